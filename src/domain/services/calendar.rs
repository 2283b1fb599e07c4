use crate::domain::models::appointment::Appointment;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};

/// Generates an iCalendar (.ics) document for an appointment.
/// Returns `None` when the slot does not exist on the local calendar (DST gap).
pub fn generate_ics(appointment: &Appointment, summary: &str) -> Option<String> {
    let starts = to_utc(appointment.date.and_time(appointment.slot.start()))?;
    let ends = to_utc(appointment.date.and_time(appointment.slot.end()))?;

    let mut event = IcalEvent::new();
    event.summary(summary).starts(starts).ends(ends).uid(&appointment.id);
    if let Some(message) = &appointment.message {
        event.description(message);
    }

    let mut calendar = Calendar::new();
    calendar.push(event.done());
    Some(calendar.to_string())
}

fn to_utc(local: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
