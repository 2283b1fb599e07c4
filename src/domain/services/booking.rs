use crate::domain::models::{
    appointment::{Appointment, BookingRequest, NewAppointmentParams},
    notification::Notification,
    opening_hours::OpeningHoursTable,
};
use crate::domain::ports::{AppointmentRepository, Clock, Notifier};
use crate::domain::services::validation::{validate_contact, validate_date, validate_slot};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub struct BookingService {
    repo: Arc<dyn AppointmentRepository>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    table: OpeningHoursTable,
    operator_email: String,
}

impl BookingService {
    pub fn new(
        repo: Arc<dyn AppointmentRepository>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        table: OpeningHoursTable,
        operator_email: String,
    ) -> Self {
        Self { repo, notifier, clock, table, operator_email }
    }

    /// Validates the request and stores a pending appointment.
    ///
    /// The pre-check only saves a round trip; the unique index on active
    /// (date, slot) pairs decides which of two racing requests wins.
    pub async fn book(&self, request: BookingRequest) -> Result<Appointment, AppError> {
        let contact = validate_contact(
            &request.name,
            &request.email,
            request.phone.as_deref(),
            request.message.as_deref(),
        )?;

        let now = self.clock.now();
        let date = validate_date(&request.date, now.date(), &self.table)?;
        let slot = validate_slot(date, request.slot.trim(), now, &self.table)?;

        if !self.repo.find_active_by_slot(date, &slot).await?.is_empty() {
            warn!(%date, %slot, "slot already held, rejecting booking");
            return Err(AppError::SlotTaken);
        }

        let appointment = Appointment::new(NewAppointmentParams {
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            date,
            slot,
            message: contact.message,
        });

        let created = self.repo.create(&appointment).await.inspect_err(|e| {
            if matches!(e, AppError::SlotTaken) {
                warn!(%date, %slot, "lost booking race on unique index");
            }
        })?;

        info!(appointment_id = %created.id, %date, %slot, "appointment requested");

        self.notifier.dispatch(Notification::admin(&self.operator_email, created.clone()));

        Ok(created)
    }
}
