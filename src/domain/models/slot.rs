use crate::error::AppError;
use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const SLOT_MINUTES: u32 = 30;

static SLOT_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1][0-9]|2[0-3]):[0-5][0-9]-([0-1][0-9]|2[0-3]):[0-5][0-9]$")
        .expect("slot pattern is valid")
});

/// A bookable interval `[start, end)` on the local calendar, written `HH:MM-HH:MM`.
///
/// Parsing only checks the textual format; duration and grid membership are the
/// validator's business, so a parsed `Slot` may still be rejected later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slot {
    start: NaiveTime,
    end: NaiveTime,
}

impl Slot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Signed length in minutes; negative when `end` precedes `start`.
    pub fn duration_minutes(&self) -> i64 {
        minutes_of_day(self.end) as i64 - minutes_of_day(self.start) as i64
    }
}

pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

impl FromStr for Slot {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if !SLOT_FORMAT.is_match(raw) {
            return Err(AppError::MalformedSlot);
        }
        let (start, end) = raw.split_once('-').ok_or(AppError::MalformedSlot)?;
        let start = NaiveTime::parse_from_str(start, "%H:%M").map_err(|_| AppError::MalformedSlot)?;
        let end = NaiveTime::parse_from_str(end, "%H:%M").map_err(|_| AppError::MalformedSlot)?;
        Ok(Self { start, end })
    }
}

impl TryFrom<String> for Slot {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.to_string()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}
