use crate::domain::models::availability::{AvailabilityRow, BlockedDateEntry};
use crate::domain::ports::AvailabilityRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use std::collections::HashSet;

pub struct SqliteAvailabilityRepo {
    pool: SqlitePool,
}

impl SqliteAvailabilityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepo {
    async fn replace_for_property(
        &self,
        property_id: &str,
        entries: &[BlockedDateEntry],
        synced_at: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM cached_availability WHERE property_id = ?")
            .bind(property_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        // Overlapping feed events can emit the same date twice; dedupe so
        // the returned count is the number of distinct blocked dates.
        let mut seen = HashSet::with_capacity(entries.len());
        let mut inserted = 0u64;
        for entry in entries {
            if !seen.insert(entry.date) {
                continue;
            }
            sqlx::query(
                "INSERT INTO cached_availability (property_id, date, available, blocked_reason, last_synced)
                 VALUES (?, ?, 0, ?, ?)"
            )
                .bind(property_id)
                .bind(entry.date)
                .bind(&entry.reason)
                .bind(synced_at)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            inserted += 1;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(inserted)
    }

    async fn blocked_in_range(
        &self,
        property_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AvailabilityRow>, AppError> {
        sqlx::query_as::<_, AvailabilityRow>(
            "SELECT * FROM cached_availability
             WHERE property_id = ? AND available = 0 AND date >= ? AND date < ?
             ORDER BY date ASC"
        )
            .bind(property_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_blocked(&self, property_id: &str) -> Result<Vec<AvailabilityRow>, AppError> {
        sqlx::query_as::<_, AvailabilityRow>(
            "SELECT * FROM cached_availability WHERE property_id = ? AND available = 0 ORDER BY date ASC"
        )
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
