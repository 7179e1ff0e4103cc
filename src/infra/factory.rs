use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::infra::feed::http_feed_fetcher::HttpFeedFetcher;
use crate::infra::rates::csv_rate_source::CsvRateSource;
use crate::infra::repositories::{
    sqlite_availability_repo::SqliteAvailabilityRepo,
    sqlite_booking_repo::SqliteBookingRepo,
    sqlite_channel_repo::SqliteChannelRepo,
    sqlite_guest_repo::SqliteGuestRepo,
    sqlite_property_repo::{SqliteApartmentRepo, SqlitePropertyRepo},
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    AppState {
        config: config.clone(),
        property_repo: Arc::new(SqlitePropertyRepo::new(pool.clone())),
        apartment_repo: Arc::new(SqliteApartmentRepo::new(pool.clone())),
        guest_repo: Arc::new(SqliteGuestRepo::new(pool.clone())),
        channel_repo: Arc::new(SqliteChannelRepo::new(pool.clone())),
        availability_repo: Arc::new(SqliteAvailabilityRepo::new(pool.clone())),
        booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
        feed_fetcher: Arc::new(HttpFeedFetcher::new(Duration::from_secs(
            config.feed_timeout_secs,
        ))),
        rate_source: Arc::new(CsvRateSource::new(config.rates_dir.clone())),
    }
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
