use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::{requests::CreateAppointmentRequest, responses::AppointmentResponse};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!(date = %payload.date, slot = %payload.slot, "booking requested");

    let appointment = state.booking_service.book(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(AppointmentResponse { success: true, appointment })))
}
