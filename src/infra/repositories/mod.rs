pub mod sqlite_availability_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_channel_repo;
pub mod sqlite_guest_repo;
pub mod sqlite_property_repo;
