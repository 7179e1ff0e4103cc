use crate::domain::models::booking::{BookingStatus, PaymentStatus};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub property_id: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Deserialize)]
pub struct BlockedDatesQuery {
    pub property_id: String,
}

#[derive(Deserialize)]
pub struct PricingQuery {
    pub property_id: String,
    pub check_in_date: String,
    pub check_out_date: String,
}

/// Pricing breakdown precomputed by the quote endpoint and echoed back by
/// the booking form.
#[derive(Deserialize)]
pub struct BookingPricingInput {
    pub number_of_nights: i64,
    pub base_price: Option<f64>,
    pub cleaning_fee: Option<f64>,
    pub service_fee: Option<f64>,
    pub total: f64,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub property_id: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub special_requests: Option<String>,
    pub pricing: BookingPricingInput,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
}

#[derive(Deserialize)]
pub struct CalendarExportQuery {
    pub apartment_id: Option<String>,
}
