use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::fmt;
use thiserror::Error;
use tracing::error;

/// Request field that failed field-level validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
    Status,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Message => "message",
            Field::Status => "status",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid {0}")]
    Validation(Field),
    #[error("Malformed slot")]
    MalformedSlot,
    #[error("Closed day")]
    ClosedDay,
    #[error("Slot outside opening hours")]
    OutsideHours,
    #[error("Slot is not 30 minutes long")]
    InvalidDuration,
    #[error("Slot already elapsed")]
    SlotElapsed,
    #[error("Slot not on the opening-hours grid")]
    UnknownSlot,
    #[error("Date is in the past")]
    PastDate,
    #[error("Invalid date")]
    InvalidDate,
    #[error("Slot already taken")]
    SlotTaken,
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Status transition failed: {0}")]
    TransitionError(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable discriminant, returned to API callers as `code`.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::MalformedSlot => "malformed_slot",
            AppError::ClosedDay => "closed_day",
            AppError::OutsideHours => "outside_hours",
            AppError::InvalidDuration => "invalid_duration",
            AppError::SlotElapsed => "slot_elapsed",
            AppError::UnknownSlot => "unknown_slot",
            AppError::PastDate => "past_date",
            AppError::InvalidDate => "invalid_date",
            AppError::SlotTaken => "slot_taken",
            AppError::NotFound(_) => "not_found",
            AppError::TransitionError(_) => "transition_error",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::Unauthorized => "unauthorized",
            AppError::Internal(_) => "internal",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(Field::Name) => "Name must contain at least 2 characters".into(),
            AppError::Validation(Field::Email) => "Invalid email address".into(),
            AppError::Validation(Field::Phone) => "Invalid phone number (at least 10 digits)".into(),
            AppError::Validation(Field::Message) => "Message may contain at most 500 characters".into(),
            AppError::Validation(Field::Status) => "Unknown appointment status".into(),
            AppError::MalformedSlot => "Invalid time slot format".into(),
            AppError::ClosedDay => "Closed on this day".into(),
            AppError::OutsideHours => "Time slot is outside opening hours".into(),
            AppError::InvalidDuration => "Time slot must be 30 minutes".into(),
            AppError::SlotElapsed => "This time slot has already passed".into(),
            AppError::UnknownSlot => "Invalid time slot".into(),
            AppError::PastDate => "Date cannot be in the past".into(),
            AppError::InvalidDate => "Invalid date".into(),
            AppError::SlotTaken => "This time slot is already booked. Please choose another time.".into(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::TransitionError(_) => "Could not update the appointment status".into(),
            AppError::StoreUnavailable(_) | AppError::Internal(_) => "Internal server error".into(),
            AppError::Unauthorized => "Unauthorized".into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::MalformedSlot
            | AppError::ClosedDay
            | AppError::OutsideHours
            | AppError::InvalidDuration
            | AppError::SlotElapsed
            | AppError::UnknownSlot
            | AppError::PastDate
            | AppError::InvalidDate => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::SlotTaken => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::TransitionError(_) | AppError::StoreUnavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// True when the database rejected a write because of a unique index.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e.as_database_error() {
        Some(db_err) => {
            // 2067 = SQLite Unique Constraint
            // 23505 = PostgreSQL Unique Violation
            let code = db_err.code().unwrap_or_default();
            db_err.is_unique_violation() || code == "2067" || code == "23505"
        }
        None => false,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::StoreUnavailable(e) => error!("Database error: {:?}", e),
            AppError::TransitionError(msg) => error!("Transition error: {}", msg),
            AppError::Internal(msg) => error!("Internal error: {}", msg),
            _ => {}
        }

        let mut body = json!({
            "error": self.user_message(),
            "code": self.code(),
        });
        if let AppError::Validation(field) = &self {
            body["field"] = json!(field);
        }

        (self.status_code(), Json(body)).into_response()
    }
}
