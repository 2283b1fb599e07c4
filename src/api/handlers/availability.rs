use axum::{extract::{Query, State}, Json};
use crate::api::dtos::{requests::AvailabilityQuery, responses::SlotsResponse};
use crate::domain::services::validation::parse_date;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let raw = query.date.ok_or(AppError::InvalidDate)?;
    let date = parse_date(&raw)?;

    let slots = state.availability_service.list_availability(date).await?;

    Ok(Json(SlotsResponse { date: date.to_string(), slots }))
}
