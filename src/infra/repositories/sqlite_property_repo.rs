use crate::domain::models::property::{Apartment, Property};
use crate::domain::ports::{ApartmentRepository, PropertyRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePropertyRepo {
    pool: SqlitePool,
}

impl SqlitePropertyRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for SqlitePropertyRepo {
    async fn create(&self, property: &Property) -> Result<Property, AppError> {
        sqlx::query_as::<_, Property>(
            "INSERT INTO properties (external_id, name, ical_url, created_at) VALUES (?, ?, ?, ?) RETURNING *"
        )
            .bind(&property.external_id)
            .bind(&property.name)
            .bind(&property.ical_url)
            .bind(property.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Property>, AppError> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE external_id = ?")
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_with_feed(&self) -> Result<Vec<Property>, AppError> {
        sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE ical_url IS NOT NULL ORDER BY external_id ASC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}

pub struct SqliteApartmentRepo {
    pool: SqlitePool,
}

impl SqliteApartmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApartmentRepository for SqliteApartmentRepo {
    async fn create(&self, apartment: &Apartment) -> Result<Apartment, AppError> {
        sqlx::query_as::<_, Apartment>(
            "INSERT INTO apartments (id, apartment_number, address, created_at) VALUES (?, ?, ?, ?) RETURNING *"
        )
            .bind(&apartment.id)
            .bind(&apartment.apartment_number)
            .bind(&apartment.address)
            .bind(apartment.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Apartment>, AppError> {
        sqlx::query_as::<_, Apartment>("SELECT * FROM apartments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn resolve_external(&self, external_id: &str) -> Result<Option<Apartment>, AppError> {
        sqlx::query_as::<_, Apartment>(
            "SELECT a.* FROM apartments a
             INNER JOIN property_mapping m ON m.apartment_id = a.id
             WHERE m.external_property_id = ?"
        )
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn upsert_mapping(&self, external_id: &str, apartment_id: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO property_mapping (external_property_id, apartment_id) VALUES (?, ?)
             ON CONFLICT(external_property_id) DO UPDATE SET apartment_id = excluded.apartment_id"
        )
            .bind(external_id)
            .bind(apartment_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
