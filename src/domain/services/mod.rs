pub mod calendar;
pub mod feed;
pub mod pricing;
pub mod sync;
