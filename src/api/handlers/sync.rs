use crate::domain::services::sync::SyncService;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

fn sync_service(state: &AppState) -> SyncService {
    SyncService::new(
        state.property_repo.clone(),
        state.availability_repo.clone(),
        state.feed_fetcher.clone(),
    )
}

/// Refreshes the availability ledger for one property from its iCal feed.
pub async fn sync_property(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = sync_service(&state).sync_property(&property_id).await?;
    Ok(Json(report))
}

/// Batch refresh for every property with a feed configured. Always 200: the
/// per-property report carries the failures.
pub async fn sync_all(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let results = sync_service(&state).sync_all().await?;
    Ok(Json(results))
}
