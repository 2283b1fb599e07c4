use crate::domain::models::{
    appointment::{Appointment, AppointmentFilter, AppointmentStatus},
    notification::Notification,
    slot::Slot,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

/// Appointment storage. Implementations must reject a second active appointment
/// for the same (date, slot) at write time and report it as `AppError::SlotTaken`.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, AppError>;
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, AppError>;
    async fn find_active_by_slot(&self, date: NaiveDate, slot: &Slot) -> Result<Vec<Appointment>, AppError>;
    async fn list(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError>;
    async fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<Option<Appointment>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str, attachment_name: Option<&str>, attachment_data: Option<&[u8]>) -> Result<(), AppError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempts delivery right away and reports the outcome.
    async fn deliver(&self, notification: &Notification) -> Result<(), AppError>;

    /// Fire-and-forget. Must not block the caller; failures are only logged.
    fn dispatch(&self, notification: Notification);
}

/// Source of "now" on the business's local calendar.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
