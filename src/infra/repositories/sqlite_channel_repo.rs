use crate::domain::models::channel::BookingChannel;
use crate::domain::ports::ChannelRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteChannelRepo {
    pool: SqlitePool,
}

impl SqliteChannelRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for SqliteChannelRepo {
    async fn create(&self, channel: &BookingChannel) -> Result<BookingChannel, AppError> {
        sqlx::query_as::<_, BookingChannel>(
            "INSERT INTO booking_channels (id, name, commission_rate, payment_processing_fee, created_at)
             VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&channel.id)
            .bind(&channel.name)
            .bind(channel.commission_rate)
            .bind(channel.payment_processing_fee)
            .bind(channel.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<BookingChannel>, AppError> {
        sqlx::query_as::<_, BookingChannel>("SELECT * FROM booking_channels WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
