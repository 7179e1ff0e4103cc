use crate::domain::models::guest::Guest;
use crate::domain::ports::GuestRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteGuestRepo {
    pool: SqlitePool,
}

impl SqliteGuestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for SqliteGuestRepo {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (id, name, email, phone, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&guest.id)
            .bind(&guest.name)
            .bind(&guest.email)
            .bind(&guest.phone)
            .bind(guest.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Guest>, AppError> {
        // Soft-unique key: the schema does not enforce uniqueness, lookup
        // takes the oldest matching record.
        sqlx::query_as::<_, Guest>(
            "SELECT * FROM guests WHERE email = ? ORDER BY created_at ASC LIMIT 1"
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET name = ?, phone = ? WHERE id = ? RETURNING *"
        )
            .bind(&guest.name)
            .bind(&guest.phone)
            .bind(&guest.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
