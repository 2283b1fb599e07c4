use crate::domain::models::appointment::{Appointment, AppointmentStatus};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    AdminNotify,
    Confirm,
    Reject,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::AdminNotify => "admin-notify",
            NotificationKind::Confirm => "confirm",
            NotificationKind::Reject => "reject",
        }
    }

    /// Customer-facing outcome mail for a freshly applied status.
    pub fn for_outcome(status: AppointmentStatus) -> Option<Self> {
        match status {
            AppointmentStatus::Approved => Some(NotificationKind::Confirm),
            AppointmentStatus::Rejected => Some(NotificationKind::Reject),
            AppointmentStatus::Pending => None,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intent to tell someone about an appointment. Delivery is best effort.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub recipient: String,
    pub appointment: Appointment,
}

impl Notification {
    pub fn admin(operator_email: &str, appointment: Appointment) -> Self {
        Self {
            kind: NotificationKind::AdminNotify,
            recipient: operator_email.to_string(),
            appointment,
        }
    }

    pub fn customer(kind: NotificationKind, appointment: Appointment) -> Self {
        Self {
            kind,
            recipient: appointment.email.clone(),
            appointment,
        }
    }
}
