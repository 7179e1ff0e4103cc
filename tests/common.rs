use stay_backend::{
    api::router::create_router,
    config::{Config, PricingConfig},
    domain::models::property::{Apartment, Property},
    domain::models::rates::RateTable,
    domain::ports::{ApartmentRepository, FeedFetcher, PropertyRepository, RateTableSource},
    error::AppError,
    infra::repositories::{
        sqlite_availability_repo::SqliteAvailabilityRepo,
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_channel_repo::SqliteChannelRepo,
        sqlite_guest_repo::SqliteGuestRepo,
        sqlite_property_repo::{SqliteApartmentRepo, SqlitePropertyRepo},
    },
    state::AppState,
};

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Programmable in-memory feed host: canned iCal bodies per URL, plus a
/// fail-list to simulate an unreachable calendar host.
#[derive(Default)]
pub struct MockFeedFetcher {
    feeds: Mutex<HashMap<String, String>>,
    failing: Mutex<HashSet<String>>,
}

impl MockFeedFetcher {
    pub fn set_feed(&self, url: &str, body: &str) {
        self.feeds.lock().unwrap().insert(url.to_string(), body.to_string());
        self.failing.lock().unwrap().remove(url);
    }

    pub fn set_failing(&self, url: &str) {
        self.failing.lock().unwrap().insert(url.to_string());
    }
}

#[async_trait]
impl FeedFetcher for MockFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        if self.failing.lock().unwrap().contains(url) {
            return Err(AppError::Upstream(format!("Feed fetch timed out after 5s: {}", url)));
        }
        self.feeds
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::Upstream(format!("Feed fetch failed: no route to {}", url)))
    }
}

#[derive(Default)]
pub struct MockRateSource {
    tables: Mutex<HashMap<String, RateTable>>,
}

impl MockRateSource {
    pub fn set_table(&self, property_id: &str, table: RateTable) {
        self.tables.lock().unwrap().insert(property_id.to_string(), table);
    }
}

#[async_trait]
impl RateTableSource for MockRateSource {
    async fn load(&self, property_id: &str) -> Result<Option<RateTable>, AppError> {
        Ok(self.tables.lock().unwrap().get(property_id).cloned())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub feed: Arc<MockFeedFetcher>,
    pub rates: Arc<MockRateSource>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            pricing: PricingConfig::default(),
            rates_dir: "./rates".to_string(),
            feed_timeout_secs: 5,
            calendar_uid_domain: "stays.test".to_string(),
        };

        let feed = Arc::new(MockFeedFetcher::default());
        let rates = Arc::new(MockRateSource::default());

        let state = Arc::new(AppState {
            config,
            property_repo: Arc::new(SqlitePropertyRepo::new(pool.clone())),
            apartment_repo: Arc::new(SqliteApartmentRepo::new(pool.clone())),
            guest_repo: Arc::new(SqliteGuestRepo::new(pool.clone())),
            channel_repo: Arc::new(SqliteChannelRepo::new(pool.clone())),
            availability_repo: Arc::new(SqliteAvailabilityRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            feed_fetcher: feed.clone(),
            rate_source: rates.clone(),
        });

        let router = create_router(state.clone());

        Self { router, pool, db_filename, state, feed, rates }
    }

    pub async fn seed_apartment(&self, apartment_number: &str) -> String {
        let apartment = self
            .state
            .apartment_repo
            .create(&Apartment::new(apartment_number.to_string(), None))
            .await
            .expect("Failed to seed apartment");
        apartment.id
    }

    pub async fn seed_property(&self, external_id: &str, ical_url: Option<&str>) {
        self.state
            .property_repo
            .create(&Property {
                external_id: external_id.to_string(),
                name: format!("Test property {}", external_id),
                ical_url: ical_url.map(str::to_string),
                created_at: Utc::now(),
            })
            .await
            .expect("Failed to seed property");
    }

    pub async fn seed_mapping(&self, external_id: &str, apartment_id: &str) {
        self.state
            .apartment_repo
            .upsert_mapping(external_id, apartment_id)
            .await
            .expect("Failed to seed mapping");
    }

    pub async fn seed_blocked_date(&self, property_id: &str, date: &str, reason: &str) {
        sqlx::query(
            "INSERT INTO cached_availability (property_id, date, available, blocked_reason, last_synced)
             VALUES (?, ?, 0, ?, ?)",
        )
        .bind(property_id)
        .bind(date)
        .bind(reason)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .expect("Failed to seed blocked date");
    }
}
