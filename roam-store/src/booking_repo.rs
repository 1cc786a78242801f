use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use roam_core::{Booking, BookingRepository, BookingStatus, StoreError};

use crate::db_err;

pub struct StoreBookingRepository {
    pool: PgPool,
}

impl StoreBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    experience_id: Uuid,
    slot_id: Uuid,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    num_guests: i32,
    base_amount_cents: i64,
    discount_amount_cents: i64,
    final_amount_cents: i64,
    promo_code: Option<String>,
    status: String,
    booking_reference: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> Result<Self, StoreError> {
        let status = BookingStatus::parse(&row.status)
            .ok_or_else(|| StoreError::Backend(anyhow!("unknown booking status: {}", row.status)))?;

        Ok(Booking {
            id: row.id,
            experience_id: row.experience_id,
            slot_id: row.slot_id,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            num_guests: row.num_guests,
            base_amount_cents: row.base_amount_cents,
            discount_amount_cents: row.discount_amount_cents,
            final_amount_cents: row.final_amount_cents,
            promo_code: row.promo_code,
            status,
            booking_reference: row.booking_reference,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl BookingRepository for StoreBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, experience_id, slot_id, customer_name, customer_email,
                customer_phone, num_guests, base_amount_cents, discount_amount_cents,
                final_amount_cents, promo_code, status, booking_reference, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(booking.id)
        .bind(booking.experience_id)
        .bind(booking.slot_id)
        .bind(&booking.customer_name)
        .bind(&booking.customer_email)
        .bind(&booking.customer_phone)
        .bind(booking.num_guests)
        .bind(booking.base_amount_cents)
        .bind(booking.discount_amount_cents)
        .bind(booking.final_amount_cents)
        .bind(&booking.promo_code)
        .bind(booking.status.as_str())
        .bind(&booking.booking_reference)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // the only unique constraint on bookings is the reference
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicateReference
            }
            _ => db_err(e),
        })?;

        Ok(())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>, StoreError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, experience_id, slot_id, customer_name, customer_email,
                   customer_phone, num_guests, base_amount_cents, discount_amount_cents,
                   final_amount_cents, promo_code, status, booking_reference, created_at
            FROM bookings
            WHERE booking_reference = $1
            "#,
        )
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Booking::try_from).transpose()
    }
}
