use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{AppointmentRepository, Clock, Notifier};
use crate::domain::services::{
    availability::AvailabilityService, booking::BookingService, status::StatusService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
    pub availability_service: Arc<AvailabilityService>,
    pub booking_service: Arc<BookingService>,
    pub status_service: Arc<StatusService>,
}

impl AppState {
    /// Wires the domain services around the given collaborators.
    pub fn new(
        config: Config,
        appointment_repo: Arc<dyn AppointmentRepository>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let table = config.opening_hours.clone();

        Self {
            availability_service: Arc::new(AvailabilityService::new(
                appointment_repo.clone(),
                clock.clone(),
                table.clone(),
            )),
            booking_service: Arc::new(BookingService::new(
                appointment_repo.clone(),
                notifier.clone(),
                clock.clone(),
                table,
                config.admin_notification_email.clone(),
            )),
            status_service: Arc::new(StatusService::new(appointment_repo.clone(), notifier.clone())),
            config,
            appointment_repo,
            notifier,
            clock,
        }
    }
}
