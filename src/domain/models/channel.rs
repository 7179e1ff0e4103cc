use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DIRECT_CHANNEL: &str = "Direct";

/// Originating booking source. Bookings made on this site use the "Direct"
/// channel, bootstrapped on first use with zero commission and fees.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BookingChannel {
    pub id: String,
    pub name: String,
    pub commission_rate: f64,
    pub payment_processing_fee: f64,
    pub created_at: DateTime<Utc>,
}

impl BookingChannel {
    pub fn direct() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: DIRECT_CHANNEL.to_string(),
            commission_rate: 0.0,
            payment_processing_fee: 0.0,
            created_at: Utc::now(),
        }
    }
}
