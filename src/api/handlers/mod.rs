pub mod availability;
pub mod booking;
pub mod calendar;
pub mod health;
pub mod pricing;
pub mod sync;

use crate::error::AppError;
use chrono::{DateTime, NaiveDate};

/// Normalizes a client-supplied date to a canonical calendar day. Accepts
/// plain `YYYY-MM-DD` or a full RFC 3339 timestamp (date-picker widgets
/// sometimes send midnight timestamps with timezone noise attached).
pub(crate) fn parse_day(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.date_naive());
    }
    Err(AppError::Validation(format!(
        "Invalid {}: expected YYYY-MM-DD, got '{}'",
        field, value
    )))
}
