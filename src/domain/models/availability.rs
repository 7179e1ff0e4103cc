use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single day blocked by an upstream calendar event. Ephemeral: produced by
/// the feed parser and flattened into `cached_availability` rows during sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedDateEntry {
    pub date: NaiveDate,
    pub reason: String,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AvailabilityRow {
    pub property_id: String,
    pub date: NaiveDate,
    pub available: bool,
    pub blocked_reason: Option<String>,
    pub last_synced: DateTime<Utc>,
}
