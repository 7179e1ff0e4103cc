pub mod availability;
pub mod booking;
pub mod channel;
pub mod guest;
pub mod property;
pub mod rates;
