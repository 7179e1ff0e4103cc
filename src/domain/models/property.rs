use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A bookable unit as known to the external channel manager. `ical_url` is
/// the upstream availability feed; properties without one are never synced.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub external_id: String,
    pub name: String,
    pub ical_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The internal apartment identity every booking ultimately references.
/// External property ids map onto apartments via `property_mapping`.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Apartment {
    pub id: String,
    pub apartment_number: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Apartment {
    pub fn new(apartment_number: String, address: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            apartment_number,
            address,
            created_at: Utc::now(),
        }
    }
}
