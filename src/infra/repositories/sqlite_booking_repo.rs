use crate::domain::models::booking::{Booking, BookingStatus, PaymentStatus};
use crate::domain::ports::BookingRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| {
            let code = db.code().unwrap_or_default();
            code == "2067" || code == "1555" || code == "23505"
        })
        .unwrap_or(false)
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, booking_reference, apartment_id, guest_id, channel_id,
                                   check_in_date, check_out_date, accommodation_total, cleaning_fee,
                                   extra_charges, booking_status, payment_status, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.booking_reference).bind(&booking.apartment_id)
            .bind(&booking.guest_id).bind(&booking.channel_id)
            .bind(booking.check_in_date).bind(booking.check_out_date)
            .bind(booking.accommodation_total).bind(booking.cleaning_fee).bind(booking.extra_charges)
            .bind(booking.booking_status).bind(booking.payment_status)
            .bind(&booking.notes).bind(booking.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        // One row per stay night. The (apartment_id, night) primary key is
        // the structural double-booking guard: of two racing creations for
        // overlapping ranges, exactly one commits.
        for night in booking.nights() {
            sqlx::query(
                "INSERT INTO booking_nights (apartment_id, night, booking_id) VALUES (?, ?, ?)"
            )
                .bind(&booking.apartment_id)
                .bind(night)
                .bind(&booking.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        AppError::Conflict(format!(
                            "Night {} is already booked for this apartment",
                            night
                        ))
                    } else {
                        AppError::Database(e)
                    }
                })?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_exportable(&self, apartment_id: Option<&str>) -> Result<Vec<Booking>, AppError> {
        match apartment_id {
            Some(apartment_id) => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings
                 WHERE booking_status IN ('confirmed', 'completed') AND apartment_id = ?
                 ORDER BY check_in_date ASC"
            )
                .bind(apartment_id)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            None => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings
                 WHERE booking_status IN ('confirmed', 'completed')
                 ORDER BY check_in_date ASC"
            )
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
        }
    }

    async fn update_status(
        &self,
        id: &str,
        booking_status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let previous = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET booking_status = ?, payment_status = ? WHERE id = ? RETURNING *"
        )
            .bind(booking_status)
            .bind(payment_status)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        // A cancelled booking releases its nights for rebooking. Leaving
        // cancelled re-claims them; a conflict rolls the whole transition
        // back, so a booking is never live without its night locks.
        if booking_status == BookingStatus::Cancelled {
            sqlx::query("DELETE FROM booking_nights WHERE booking_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        } else if previous.booking_status == BookingStatus::Cancelled {
            for night in updated.nights() {
                sqlx::query(
                    "INSERT INTO booking_nights (apartment_id, night, booking_id) VALUES (?, ?, ?)"
                )
                    .bind(&updated.apartment_id)
                    .bind(night)
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        if is_unique_violation(&e) {
                            AppError::Conflict(format!(
                                "Night {} is already booked for this apartment",
                                night
                            ))
                        } else {
                            AppError::Database(e)
                        }
                    })?;
            }
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }
}
