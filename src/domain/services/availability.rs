use crate::domain::models::{
    appointment::Appointment,
    opening_hours::OpeningHoursTable,
    slot::{minutes_of_day, Slot},
};
use crate::domain::ports::{AppointmentRepository, Clock};
use crate::domain::services::slots::generate_slots;
use crate::error::AppError;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Free slots for `date`: the day's grid minus slots held by active appointments,
/// minus slots that have already started when `date` is today. Past dates have none.
pub fn available_slots(
    table: &OpeningHoursTable,
    date: NaiveDate,
    appointments: &[Appointment],
    now: NaiveDateTime,
) -> Vec<Slot> {
    let Some(window) = table.hours_on(date) else {
        return Vec::new();
    };
    if date < now.date() {
        return Vec::new();
    }

    let held: HashSet<Slot> = appointments
        .iter()
        .filter(|a| a.date == date && a.status.is_active())
        .map(|a| a.slot)
        .collect();

    let now_min = minutes_of_day(now.time());
    let is_today = date == now.date();

    generate_slots(window.open, window.close)
        .into_iter()
        .filter(|slot| !held.contains(slot))
        .filter(|slot| !is_today || minutes_of_day(slot.start()) > now_min)
        .collect()
}

pub struct AvailabilityService {
    repo: Arc<dyn AppointmentRepository>,
    clock: Arc<dyn Clock>,
    table: OpeningHoursTable,
}

impl AvailabilityService {
    pub fn new(repo: Arc<dyn AppointmentRepository>, clock: Arc<dyn Clock>, table: OpeningHoursTable) -> Self {
        Self { repo, clock, table }
    }

    /// Recomputed from storage on every call.
    pub async fn list_availability(&self, date: NaiveDate) -> Result<Vec<Slot>, AppError> {
        let now = self.clock.now();
        if self.table.hours_on(date).is_none() || date < now.date() {
            return Ok(Vec::new());
        }

        let appointments = self.repo.list_by_date(date).await?;
        let slots = available_slots(&self.table, date, &appointments, now);
        debug!(%date, held = appointments.len(), free = slots.len(), "computed availability");
        Ok(slots)
    }
}
