pub mod factory;
pub mod feed;
pub mod rates;
pub mod repositories;
