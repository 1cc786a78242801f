use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use roam_catalog::{DiscountType, PromoCode};
use roam_core::{PromoRepository, StoreError};

use crate::db_err;

pub struct StorePromoRepository {
    pool: PgPool,
}

impl StorePromoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PromoRow {
    id: Uuid,
    code: String,
    discount_type: String,
    discount_value: i64,
    min_amount_cents: Option<i64>,
    max_discount_cents: Option<i64>,
    valid_from: DateTime<Utc>,
    valid_until: DateTime<Utc>,
    is_active: bool,
}

impl TryFrom<PromoRow> for PromoCode {
    type Error = StoreError;

    fn try_from(row: PromoRow) -> Result<Self, StoreError> {
        let discount_type = DiscountType::parse(&row.discount_type).ok_or_else(|| {
            StoreError::Backend(anyhow!("unknown discount type: {}", row.discount_type))
        })?;

        Ok(PromoCode {
            id: row.id,
            code: row.code,
            discount_type,
            discount_value: row.discount_value,
            min_amount_cents: row.min_amount_cents,
            max_discount_cents: row.max_discount_cents,
            valid_from: row.valid_from,
            valid_until: row.valid_until,
            is_active: row.is_active,
        })
    }
}

#[async_trait]
impl PromoRepository for StorePromoRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, StoreError> {
        let row = sqlx::query_as::<_, PromoRow>(
            r#"
            SELECT id, code, discount_type, discount_value, min_amount_cents,
                   max_discount_cents, valid_from, valid_until, is_active
            FROM promo_codes
            WHERE LOWER(code) = LOWER($1)
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(PromoCode::try_from).transpose()
    }
}
