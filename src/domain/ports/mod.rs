use crate::domain::models::{
    availability::{AvailabilityRow, BlockedDateEntry},
    booking::{Booking, BookingStatus, PaymentStatus},
    channel::BookingChannel,
    guest::Guest,
    property::{Apartment, Property},
    rates::RateTable,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: &Property) -> Result<Property, AppError>;
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Property>, AppError>;
    /// Properties that have an iCal feed configured, i.e. the sync set.
    async fn list_with_feed(&self) -> Result<Vec<Property>, AppError>;
}

#[async_trait]
pub trait ApartmentRepository: Send + Sync {
    async fn create(&self, apartment: &Apartment) -> Result<Apartment, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Apartment>, AppError>;
    /// Follows the external-id -> apartment mapping table.
    async fn resolve_external(&self, external_id: &str) -> Result<Option<Apartment>, AppError>;
    async fn upsert_mapping(&self, external_id: &str, apartment_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Guest>, AppError>;
    async fn update(&self, guest: &Guest) -> Result<Guest, AppError>;
}

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    async fn create(&self, channel: &BookingChannel) -> Result<BookingChannel, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<BookingChannel>, AppError>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Full replace: deletes every row for the property and bulk-inserts the
    /// fresh set in one transaction, so no stale blocks survive and a failed
    /// insert never leaves an emptied ledger behind.
    async fn replace_for_property(
        &self,
        property_id: &str,
        entries: &[BlockedDateEntry],
        synced_at: DateTime<Utc>,
    ) -> Result<u64, AppError>;
    /// Blocked rows with `start <= date < end`, ascending. The checkout day
    /// itself never blocks a stay.
    async fn blocked_in_range(
        &self,
        property_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AvailabilityRow>, AppError>;
    async fn list_blocked(&self, property_id: &str) -> Result<Vec<AvailabilityRow>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking plus one `booking_nights` row per stay night in
    /// one transaction. A night already claimed for the apartment violates
    /// the table's primary key and surfaces as a conflict.
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Confirmed/completed bookings, optionally narrowed to one apartment,
    /// for outbound calendar export.
    async fn list_exportable(&self, apartment_id: Option<&str>) -> Result<Vec<Booking>, AppError>;
    async fn update_status(
        &self,
        id: &str,
        booking_status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> Result<Booking, AppError>;
}

/// Outbound fetch of an iCal feed. Implementations must bound the request
/// with a deadline so a hung calendar host cannot hang reconciliation.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, AppError>;
}

/// Per-property rate-table lookup. `Ok(None)` means no table is configured
/// for the property and pricing falls back to the default nightly rate.
#[async_trait]
pub trait RateTableSource: Send + Sync {
    async fn load(&self, property_id: &str) -> Result<Option<RateTable>, AppError>;
}
