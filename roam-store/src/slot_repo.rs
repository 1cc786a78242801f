use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use roam_catalog::Slot;
use roam_core::{SlotRepository, StoreError};

use crate::catalog_repo::SlotRow;
use crate::db_err;

pub struct StoreSlotRepository {
    pool: PgPool,
}

impl StoreSlotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for StoreSlotRepository {
    async fn get_slot(&self, id: Uuid) -> Result<Option<Slot>, StoreError> {
        let row = sqlx::query_as::<_, SlotRow>(
            "SELECT id, experience_id, date, time, capacity, booked, price_modifier_cents \
             FROM slots WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Slot::from))
    }

    async fn reserve(&self, id: Uuid, num_guests: i32) -> Result<Slot, StoreError> {
        // Admission test and increment in one conditional UPDATE. Two
        // concurrent parties can both SELECT room on the same slot, so the
        // check must ride on the write itself; the database serializes the
        // row update and the predicate re-evaluates under that lock.
        let updated = sqlx::query_as::<_, SlotRow>(
            r#"
            UPDATE slots
            SET booked = booked + $2
            WHERE id = $1 AND booked + $2 <= capacity
            RETURNING id, experience_id, date, time, capacity, booked, price_modifier_cents
            "#,
        )
        .bind(id)
        .bind(num_guests)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        if let Some(row) = updated {
            return Ok(row.into());
        }

        // No row matched: either the slot is missing or the party didn't fit
        match self.get_slot(id).await? {
            None => Err(StoreError::NotFound),
            Some(slot) => Err(StoreError::CapacityExceeded {
                requested: num_guests,
                remaining: slot.remaining(),
            }),
        }
    }

    async fn release(&self, id: Uuid, num_guests: i32) -> Result<(), StoreError> {
        sqlx::query("UPDATE slots SET booked = GREATEST(booked - $2, 0) WHERE id = $1")
            .bind(id)
            .bind(num_guests)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}
