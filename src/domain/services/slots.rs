use crate::domain::models::slot::{minutes_of_day, Slot, SLOT_MINUTES};
use chrono::NaiveTime;

/// Tiles `[open, close)` with consecutive 30 minute slots starting at `open`.
/// A trailing remainder shorter than one slot is dropped.
pub fn generate_slots(open: NaiveTime, close: NaiveTime) -> Vec<Slot> {
    let open_min = minutes_of_day(open);
    let close_min = minutes_of_day(close);

    let mut slots = Vec::new();
    let mut start = open_min;
    while start + SLOT_MINUTES <= close_min {
        let end = start + SLOT_MINUTES;
        if let (Some(s), Some(e)) = (time_of(start), time_of(end)) {
            slots.push(Slot::new(s, e));
        }
        start = end;
    }
    slots
}

fn time_of(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}
