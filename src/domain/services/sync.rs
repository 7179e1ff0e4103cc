use crate::domain::ports::{AvailabilityRepository, FeedFetcher, PropertyRepository};
use crate::domain::services::feed::parse_feed;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Serialize, Clone)]
pub struct SyncReport {
    pub property_id: String,
    pub blocked_dates: u64,
    pub last_synced: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct PropertySyncResult {
    pub property_id: String,
    pub success: bool,
    pub blocked_dates: Option<u64>,
    pub error: Option<String>,
}

/// Reconciles the local availability ledger against upstream iCal feeds.
/// Pull/batch model: staleness is bounded only by how often an external
/// scheduler invokes this service.
pub struct SyncService {
    property_repo: Arc<dyn PropertyRepository>,
    availability_repo: Arc<dyn AvailabilityRepository>,
    feed_fetcher: Arc<dyn FeedFetcher>,
}

impl SyncService {
    pub fn new(
        property_repo: Arc<dyn PropertyRepository>,
        availability_repo: Arc<dyn AvailabilityRepository>,
        feed_fetcher: Arc<dyn FeedFetcher>,
    ) -> Self {
        Self { property_repo, availability_repo, feed_fetcher }
    }

    /// Fetch, parse and fully replace the ledger for one property. The
    /// replace runs in a single transaction: a failure after the delete
    /// rolls back instead of leaving a half-applied ledger.
    pub async fn sync_property(&self, property_id: &str) -> Result<SyncReport, AppError> {
        let property = self
            .property_repo
            .find_by_external_id(property_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Property {} not found", property_id)))?;

        let ical_url = property.ical_url.as_deref().ok_or_else(|| {
            AppError::Configuration(format!(
                "No iCal feed configured for property {}",
                property_id
            ))
        })?;

        info!("Syncing availability for property {} from {}", property_id, ical_url);

        let feed_text = self.feed_fetcher.fetch(ical_url).await?;
        let blocked = parse_feed(&feed_text)?;

        let synced_at = Utc::now();
        let inserted = self
            .availability_repo
            .replace_for_property(property_id, &blocked, synced_at)
            .await?;

        info!("Synced {} blocked dates for property {}", inserted, property_id);
        Ok(SyncReport { property_id: property_id.to_string(), blocked_dates: inserted, last_synced: synced_at })
    }

    /// Syncs every property with a feed configured. One property's failure
    /// never aborts the siblings; the caller gets a per-property report.
    pub async fn sync_all(&self) -> Result<Vec<PropertySyncResult>, AppError> {
        let properties = self.property_repo.list_with_feed().await?;
        info!("Starting availability sync for {} properties", properties.len());

        let mut results = Vec::with_capacity(properties.len());
        for property in properties {
            match self.sync_property(&property.external_id).await {
                Ok(report) => results.push(PropertySyncResult {
                    property_id: property.external_id,
                    success: true,
                    blocked_dates: Some(report.blocked_dates),
                    error: None,
                }),
                Err(e) => {
                    error!("Sync failed for property {}: {}", property.external_id, e);
                    results.push(PropertySyncResult {
                        property_id: property.external_id,
                        success: false,
                        blocked_dates: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let ok = results.iter().filter(|r| r.success).count();
        info!("Sync complete: {}/{} properties succeeded", ok, results.len());
        Ok(results)
    }
}
