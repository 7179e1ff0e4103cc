use crate::api::dtos::requests::{CreateBookingRequest, UpdateBookingStatusRequest};
use crate::api::dtos::responses::{BookingCreatedResponse, BookingSummary};
use crate::api::handlers::parse_day;
use crate::domain::models::booking::{validate_status_pair, Booking, NewBookingParams};
use crate::domain::models::channel::{BookingChannel, DIRECT_CHANNEL};
use crate::domain::models::guest::Guest;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Creates a direct booking. Sequential steps, each with a distinguishable
/// failure: validate, re-check availability, resolve guest, resolve the
/// apartment, bootstrap the Direct channel, persist in `pending`/`pending`.
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Validation: no side effects before this passes.
    if payload.property_id.trim().is_empty() {
        return Err(AppError::Validation("Property id is required".to_string()));
    }
    if payload.guest_name.trim().is_empty() || payload.guest_email.trim().is_empty() {
        return Err(AppError::Validation(
            "Guest name and email are required".to_string(),
        ));
    }
    let check_in = parse_day("check_in_date", &payload.check_in_date)?;
    let check_out = parse_day("check_out_date", &payload.check_out_date)?;
    if check_out <= check_in {
        return Err(AppError::Validation(
            "Check-out date must be after check-in date".to_string(),
        ));
    }
    let nights = (check_out - check_in).num_days();
    if payload.pricing.number_of_nights <= 0 {
        return Err(AppError::Validation(
            "Pricing must cover at least one night".to_string(),
        ));
    }
    if payload.pricing.number_of_nights != nights {
        return Err(AppError::Validation(format!(
            "Pricing covers {} night(s) but the stay is {} night(s)",
            payload.pricing.number_of_nights, nights
        )));
    }

    info!(
        "create_booking: {} nights at {} for {}",
        nights, payload.property_id, payload.guest_email
    );

    // 2. Defensive availability re-check. The caller checked moments ago,
    // but the ledger may have moved; a conflict lists the blocking dates.
    let blocked = state
        .availability_repo
        .blocked_in_range(&payload.property_id, check_in, check_out)
        .await?;
    if !blocked.is_empty() {
        warn!(
            "create_booking rejected: {} blocked date(s) in range for {}",
            blocked.len(),
            payload.property_id
        );
        return Err(AppError::Unavailable(blocked.into_iter().map(|b| b.date).collect()));
    }

    // 3. Guest upsert by email: refresh name/phone in place, or create.
    let guest = match state.guest_repo.find_by_email(&payload.guest_email).await? {
        Some(mut existing) => {
            existing.name = payload.guest_name.clone();
            existing.phone = payload.guest_phone.clone();
            state.guest_repo.update(&existing).await?
        }
        None => {
            state
                .guest_repo
                .create(&Guest::new(
                    payload.guest_name.clone(),
                    payload.guest_email.clone(),
                    payload.guest_phone.clone(),
                ))
                .await?
        }
    };

    // 4. Resolve the internal apartment. A UUID-shaped id is used directly;
    // anything else goes through the external mapping table. A missing
    // mapping is an administrative setup gap, not a transient failure.
    let apartment = if Uuid::parse_str(&payload.property_id).is_ok() {
        state
            .apartment_repo
            .find_by_id(&payload.property_id)
            .await?
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "No apartment found for id {}",
                    payload.property_id
                ))
            })?
    } else {
        state
            .apartment_repo
            .resolve_external(&payload.property_id)
            .await?
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "No apartment mapping found for external property {}",
                    payload.property_id
                ))
            })?
    };

    // 5. Idempotent bootstrap of the Direct channel.
    let channel = match state.channel_repo.find_by_name(DIRECT_CHANNEL).await? {
        Some(channel) => channel,
        None => state.channel_repo.create(&BookingChannel::direct()).await?,
    };

    let cleaning_fee = payload.pricing.cleaning_fee.unwrap_or(0.0);
    let service_fee = payload.pricing.service_fee.unwrap_or(0.0);
    let accommodation_total = payload
        .pricing
        .base_price
        .unwrap_or(payload.pricing.total - cleaning_fee - service_fee);

    // 6 + 7. Reference generation and persistence. The repo writes the
    // per-night claim rows in the same transaction, so a racing overlapping
    // creation loses with a conflict instead of double-booking.
    let booking = Booking::new(NewBookingParams {
        apartment_id: apartment.id,
        guest_id: guest.id,
        channel_id: channel.id,
        check_in_date: check_in,
        check_out_date: check_out,
        accommodation_total,
        cleaning_fee,
        extra_charges: service_fee,
        notes: payload.special_requests,
    });

    let created = state.booking_repo.create(&booking).await?;
    info!(
        "Booking {} created for apartment {} ({} - {})",
        created.booking_reference, apartment.apartment_number, check_in, check_out
    );

    let total = created.total();
    Ok(Json(BookingCreatedResponse {
        success: true,
        booking: BookingSummary {
            id: created.id,
            booking_reference: created.booking_reference,
            check_in_date: created.check_in_date,
            check_out_date: created.check_out_date,
            total,
        },
    }))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))?;
    Ok(Json(booking))
}

/// Admin status transition. The confirmed-requires-paid invariant is checked
/// here, before any write.
pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_status_pair(payload.booking_status, payload.payment_status)?;

    let updated = state
        .booking_repo
        .update_status(&booking_id, payload.booking_status, payload.payment_status)
        .await?;

    info!(
        "Booking {} transitioned to {:?}/{:?}",
        updated.booking_reference, updated.booking_status, updated.payment_status
    );
    Ok(Json(updated))
}
