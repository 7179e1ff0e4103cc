use crate::api::dtos::requests::CalendarExportQuery;
use crate::domain::services::calendar::generate_export;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

/// Outbound iCal feed of confirmed/completed bookings, for syndication back
/// to external calendar consumers.
pub async fn export_calendar(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CalendarExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state
        .booking_repo
        .list_exportable(params.apartment_id.as_deref())
        .await?;

    let ics = generate_export(&bookings, &state.config.calendar_uid_domain);

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"bookings.ics\""),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
        ],
        ics,
    ))
}
