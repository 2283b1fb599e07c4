use crate::error::{is_unique_violation, AppError};

pub mod sqlite_appointment_repo;
pub mod postgres_appointment_repo;

/// Writes that trip the active-slot unique index mean someone else holds the slot.
pub(crate) fn map_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::SlotTaken
    } else {
        AppError::StoreUnavailable(e)
    }
}
