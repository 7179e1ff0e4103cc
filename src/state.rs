use crate::config::Config;
use crate::domain::ports::{
    ApartmentRepository, AvailabilityRepository, BookingRepository, ChannelRepository,
    FeedFetcher, GuestRepository, PropertyRepository, RateTableSource,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub property_repo: Arc<dyn PropertyRepository>,
    pub apartment_repo: Arc<dyn ApartmentRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub channel_repo: Arc<dyn ChannelRepository>,
    pub availability_repo: Arc<dyn AvailabilityRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub feed_fetcher: Arc<dyn FeedFetcher>,
    pub rate_source: Arc<dyn RateTableSource>,
}
