use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl OpeningWindow {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self { open, close }
    }

    fn hm(open: (u32, u32), close: (u32, u32)) -> Option<Self> {
        Some(Self {
            open: NaiveTime::from_hms_opt(open.0, open.1, 0)?,
            close: NaiveTime::from_hms_opt(close.0, close.1, 0)?,
        })
    }
}

/// Serialized form of a single window, as written in the `OPENING_HOURS` variable.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WindowConfig {
    pub open: String,
    pub close: String,
}

/// Weekday keyed configuration; a missing weekday means closed.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WeekdayConfig {
    pub monday: Option<WindowConfig>,
    pub tuesday: Option<WindowConfig>,
    pub wednesday: Option<WindowConfig>,
    pub thursday: Option<WindowConfig>,
    pub friday: Option<WindowConfig>,
    pub saturday: Option<WindowConfig>,
    pub sunday: Option<WindowConfig>,
}

/// Opening hours indexed by days from Sunday (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningHoursTable {
    days: [Option<OpeningWindow>; 7],
}

impl Default for OpeningHoursTable {
    fn default() -> Self {
        Self {
            days: [
                None,
                OpeningWindow::hm((9, 0), (14, 30)),
                OpeningWindow::hm((9, 0), (16, 0)),
                OpeningWindow::hm((9, 0), (14, 30)),
                OpeningWindow::hm((9, 0), (16, 0)),
                OpeningWindow::hm((9, 0), (16, 0)),
                OpeningWindow::hm((11, 0), (15, 0)),
            ],
        }
    }
}

impl OpeningHoursTable {
    pub fn new(days: [Option<OpeningWindow>; 7]) -> Self {
        Self { days }
    }

    pub fn hours_for(&self, weekday: Weekday) -> Option<OpeningWindow> {
        self.days[weekday.num_days_from_sunday() as usize]
    }

    pub fn hours_on(&self, date: NaiveDate) -> Option<OpeningWindow> {
        self.hours_for(date.weekday())
    }

    pub fn from_json(raw: &str) -> Result<Self, String> {
        let config: WeekdayConfig =
            serde_json::from_str(raw).map_err(|e| format!("Invalid opening hours JSON: {}", e))?;
        Self::try_from(config)
    }
}

impl TryFrom<WeekdayConfig> for OpeningHoursTable {
    type Error = String;

    fn try_from(config: WeekdayConfig) -> Result<Self, Self::Error> {
        let parse = |name: &str, window: Option<WindowConfig>| -> Result<Option<OpeningWindow>, String> {
            let Some(window) = window else { return Ok(None) };
            let open = NaiveTime::parse_from_str(&window.open, "%H:%M")
                .map_err(|_| format!("{}: invalid open time '{}'", name, window.open))?;
            let close = NaiveTime::parse_from_str(&window.close, "%H:%M")
                .map_err(|_| format!("{}: invalid close time '{}'", name, window.close))?;
            if close <= open {
                return Err(format!("{}: close must be after open", name));
            }
            Ok(Some(OpeningWindow::new(open, close)))
        };

        Ok(Self {
            days: [
                parse("sunday", config.sunday)?,
                parse("monday", config.monday)?,
                parse("tuesday", config.tuesday)?,
                parse("wednesday", config.wednesday)?,
                parse("thursday", config.thursday)?,
                parse("friday", config.friday)?,
                parse("saturday", config.saturday)?,
            ],
        })
    }
}
