use crate::domain::services::pricing::PricingBreakdown;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize)]
pub struct BlockedDateDto {
    pub date: NaiveDate,
    pub blocked_reason: Option<String>,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    pub property_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub nights: i64,
    pub blocked_dates: Vec<BlockedDateDto>,
    pub message: String,
}

#[derive(Serialize)]
pub struct BlockedDatesResponse {
    pub property_id: String,
    pub count: usize,
    pub blocked_dates: Vec<BlockedDateDto>,
}

#[derive(Serialize)]
pub struct NightlyPriceDto {
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Serialize)]
pub struct PricingResponse {
    pub property_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_nights: i64,
    pub nightly_prices: Vec<NightlyPriceDto>,
    pub base_price: f64,
    pub average_price_per_night: f64,
    pub cleaning_fee: f64,
    pub service_fee: f64,
    pub total: f64,
    pub using_default_pricing: bool,
    pub minimum_stay: u32,
    pub meets_minimum_stay: bool,
}

impl PricingResponse {
    /// Presentation boundary: internal arithmetic is full precision, the
    /// wire format is rounded to cents.
    pub fn from_breakdown(
        property_id: String,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        breakdown: PricingBreakdown,
    ) -> Self {
        Self {
            property_id,
            check_in_date,
            check_out_date,
            number_of_nights: breakdown.number_of_nights,
            nightly_prices: breakdown
                .nightly_prices
                .into_iter()
                .map(|n| NightlyPriceDto { date: n.date, price: round_cents(n.price) })
                .collect(),
            base_price: round_cents(breakdown.base_price),
            average_price_per_night: round_cents(breakdown.average_price_per_night),
            cleaning_fee: round_cents(breakdown.cleaning_fee),
            service_fee: round_cents(breakdown.service_fee),
            total: round_cents(breakdown.total),
            using_default_pricing: breakdown.using_default_pricing,
            minimum_stay: breakdown.minimum_stay,
            meets_minimum_stay: breakdown.meets_minimum_stay,
        }
    }
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[derive(Serialize)]
pub struct BookingSummary {
    pub id: String,
    pub booking_reference: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total: f64,
}

#[derive(Serialize)]
pub struct BookingCreatedResponse {
    pub success: bool,
    pub booking: BookingSummary,
}
