use crate::domain::models::{
    appointment::{Appointment, Decision},
    notification::{Notification, NotificationKind},
};
use crate::domain::ports::{AppointmentRepository, Notifier};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{error, info};

/// Applies operator decisions. Re-applying the current status is a no-op
/// and sends nothing; a terminal status may be overridden by the other one.
pub struct StatusService {
    repo: Arc<dyn AppointmentRepository>,
    notifier: Arc<dyn Notifier>,
}

impl StatusService {
    pub fn new(repo: Arc<dyn AppointmentRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self { repo, notifier }
    }

    pub async fn transition(&self, id: &str, decision: Decision) -> Result<Appointment, AppError> {
        let target = decision.target();

        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".into()))?;

        if current.status == target {
            info!(appointment_id = %id, status = %target, "status unchanged, skipping");
            return Ok(current);
        }

        let updated = match self.repo.update_status(id, target).await {
            Ok(Some(updated)) => updated,
            Ok(None) => return Err(AppError::NotFound("Appointment not found".into())),
            Err(e) => {
                error!(appointment_id = %id, status = %target, "status update failed: {}", e);
                return Err(AppError::TransitionError(e.to_string()));
            }
        };

        info!(appointment_id = %id, from = %current.status, to = %target, "appointment status changed");

        if let Some(kind) = NotificationKind::for_outcome(target) {
            self.notifier.dispatch(Notification::customer(kind, updated.clone()));
        }

        Ok(updated)
    }
}
