use axum::{extract::{Query, State}, Json};
use crate::api::dtos::{
    requests::{AdminAuthRequest, AppointmentIdRequest, AppointmentsQuery, TestEmailKind, TestEmailRequest},
    responses::{AppointmentResponse, AppointmentsResponse, SuccessResponse},
};
use crate::api::extractors::admin::AdminUser;
use crate::domain::models::{
    appointment::{Appointment, AppointmentFilter, AppointmentStatus, Decision, NewAppointmentParams},
    notification::{Notification, NotificationKind},
};
use crate::domain::services::validation::{parse_date, validate_contact};
use crate::error::{AppError, Field};
use crate::state::AppState;
use chrono::Duration;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AdminAuthRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    if payload.password != state.config.admin_password {
        warn!("admin login failed");
        return Err(AppError::Unauthorized);
    }
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn list_appointments(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<AppointmentsResponse>, AppError> {
    let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            raw.parse::<AppointmentStatus>()
                .map_err(|_| AppError::Validation(Field::Status))?,
        ),
        None => None,
    };
    let date = match query.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(parse_date(raw)?),
        None => None,
    };

    let appointments = state.appointment_repo.list(&AppointmentFilter { status, date }).await?;
    Ok(Json(AppointmentsResponse { appointments }))
}

pub async fn approve(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AppointmentIdRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = state.status_service.transition(&payload.id, Decision::Approve).await?;
    Ok(Json(AppointmentResponse { success: true, appointment }))
}

pub async fn reject(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AppointmentIdRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = state.status_service.transition(&payload.id, Decision::Reject).await?;
    Ok(Json(AppointmentResponse { success: true, appointment }))
}

pub async fn delete_appointment(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AppointmentIdRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.appointment_repo.delete(&payload.id).await?;
    info!(appointment_id = %payload.id, "appointment deleted");
    Ok(Json(SuccessResponse { success: true }))
}

/// Sends a sample confirmation or rejection synchronously so the operator
/// can check the mail relay end to end.
pub async fn send_test_email(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TestEmailRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let contact = validate_contact("Test Customer", &payload.email, None, None)?;

    let sample = Appointment::new(NewAppointmentParams {
        name: contact.name,
        email: contact.email,
        phone: None,
        date: state.clock.today() + Duration::days(1),
        slot: "10:00-10:30".parse()?,
        message: Some("This is a test message".into()),
    });

    let kind = match payload.kind {
        TestEmailKind::Confirm => NotificationKind::Confirm,
        TestEmailKind::Reject => NotificationKind::Reject,
    };

    state.notifier.deliver(&Notification::customer(kind, sample)).await?;
    info!(kind = %kind, "test email sent");

    Ok(Json(SuccessResponse { success: true }))
}
