use crate::api::dtos::requests::{AvailabilityQuery, BlockedDatesQuery};
use crate::api::dtos::responses::{AvailabilityResponse, BlockedDateDto, BlockedDatesResponse};
use crate::api::handlers::parse_day;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

/// Interactive date-picker check: `[start_date, end_date)` against the
/// ledger. The checkout day itself never blocks. Returns the specific
/// conflicting dates so the UI can explain an unavailable range.
pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let start = parse_day("start_date", &params.start_date)?;
    let end = parse_day("end_date", &params.end_date)?;

    if end <= start {
        return Err(AppError::Validation(
            "Check-out date must be after check-in date".to_string(),
        ));
    }

    let blocked = state
        .availability_repo
        .blocked_in_range(&params.property_id, start, end)
        .await?;

    let nights = (end - start).num_days();
    let available = blocked.is_empty();
    let message = if available {
        format!("Property is available for {} night(s)", nights)
    } else {
        format!(
            "Property is not available. {} date(s) are already booked.",
            blocked.len()
        )
    };

    info!(
        "Availability check for {} [{} .. {}): available={}",
        params.property_id, start, end, available
    );

    Ok(Json(AvailabilityResponse {
        available,
        property_id: params.property_id,
        start_date: start,
        end_date: end,
        nights,
        blocked_dates: blocked
            .into_iter()
            .map(|row| BlockedDateDto { date: row.date, blocked_reason: row.blocked_reason })
            .collect(),
        message,
    }))
}

/// Full blocked list for a property, used to grey out days in the calendar.
pub async fn get_blocked_dates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BlockedDatesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let blocked = state.availability_repo.list_blocked(&params.property_id).await?;

    Ok(Json(BlockedDatesResponse {
        property_id: params.property_id,
        count: blocked.len(),
        blocked_dates: blocked
            .into_iter()
            .map(|row| BlockedDateDto { date: row.date, blocked_reason: row.blocked_reason })
            .collect(),
    }))
}
