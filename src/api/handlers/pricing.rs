use crate::api::dtos::requests::PricingQuery;
use crate::api::dtos::responses::PricingResponse;
use crate::api::handlers::parse_day;
use crate::domain::models::rates::RateTable;
use crate::domain::services::pricing::quote;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::warn;

pub async fn get_pricing(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PricingQuery>,
) -> Result<impl IntoResponse, AppError> {
    let check_in = parse_day("check_in_date", &params.check_in_date)?;
    let check_out = parse_day("check_out_date", &params.check_out_date)?;

    // A property without a rate table still gets a quote: every night falls
    // back to the default rate and the breakdown is flagged as an estimate.
    let table = match state.rate_source.load(&params.property_id).await? {
        Some(table) => table,
        None => {
            warn!("No rate table for property {}, quoting at default rates", params.property_id);
            RateTable::default()
        }
    };

    let breakdown = quote(check_in, check_out, &table, &state.config.pricing)?;

    Ok(Json(PricingResponse::from_breakdown(
        params.property_id,
        check_in,
        check_out,
        breakdown,
    )))
}
