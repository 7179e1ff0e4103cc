use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Refunded,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub booking_reference: String,
    pub apartment_id: String,
    pub guest_id: String,
    pub channel_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub accommodation_total: f64,
    pub cleaning_fee: f64,
    pub extra_charges: f64,
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub apartment_id: String,
    pub guest_id: String,
    pub channel_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub accommodation_total: f64,
    pub cleaning_fee: f64,
    pub extra_charges: f64,
    pub notes: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            booking_reference: generate_reference(),
            apartment_id: params.apartment_id,
            guest_id: params.guest_id,
            channel_id: params.channel_id,
            check_in_date: params.check_in_date,
            check_out_date: params.check_out_date,
            accommodation_total: params.accommodation_total,
            cleaning_fee: params.cleaning_fee,
            extra_charges: params.extra_charges,
            booking_status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            notes: params.notes,
            created_at: Utc::now(),
        }
    }

    /// The nights consumed by the stay: `[check_in, check_out)`.
    pub fn nights(&self) -> Vec<NaiveDate> {
        self.check_in_date
            .iter_days()
            .take_while(|d| *d < self.check_out_date)
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.accommodation_total + self.cleaning_fee + self.extra_charges
    }
}

/// A booking may only be confirmed once payment has settled. Enforced at
/// write time, not just in the admin UI.
pub fn validate_status_pair(
    booking_status: BookingStatus,
    payment_status: PaymentStatus,
) -> Result<(), AppError> {
    if booking_status == BookingStatus::Confirmed && payment_status != PaymentStatus::Paid {
        return Err(AppError::Validation(
            "Booking cannot be confirmed until payment status is 'paid'".to_string(),
        ));
    }
    Ok(())
}

/// Human-shareable reference: `DIR-{unix millis}-{7 random alphanumerics}`.
/// Collision odds are negligible, not cryptographic.
pub fn generate_reference() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(7)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect();
    format!("DIR-{}-{}", Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reference_uniqueness_in_bulk() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(generate_reference()), "booking reference collided");
        }
    }

    #[test]
    fn test_reference_shape() {
        let r = generate_reference();
        assert!(r.starts_with("DIR-"));
        let parts: Vec<&str> = r.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].len(), 7);
        assert!(parts[2].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_confirmed_requires_paid() {
        assert!(validate_status_pair(BookingStatus::Confirmed, PaymentStatus::Pending).is_err());
        assert!(validate_status_pair(BookingStatus::Confirmed, PaymentStatus::Partial).is_err());
        assert!(validate_status_pair(BookingStatus::Confirmed, PaymentStatus::Paid).is_ok());
        assert!(validate_status_pair(BookingStatus::Pending, PaymentStatus::Pending).is_ok());
        assert!(validate_status_pair(BookingStatus::Cancelled, PaymentStatus::Refunded).is_ok());
    }

    #[test]
    fn test_nights_excludes_checkout_day() {
        let booking = Booking::new(NewBookingParams {
            apartment_id: "a".into(),
            guest_id: "g".into(),
            channel_id: "c".into(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
            accommodation_total: 4500.0,
            cleaning_fee: 500.0,
            extra_charges: 540.0,
            notes: None,
        });
        let nights = booking.nights();
        assert_eq!(nights.len(), 3);
        assert_eq!(nights[0], NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
        assert_eq!(*nights.last().unwrap(), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
        assert!((booking.total() - 5540.0).abs() < f64::EPSILON);
    }
}
