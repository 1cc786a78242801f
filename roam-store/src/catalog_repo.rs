use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use roam_catalog::{Experience, Slot};
use roam_core::{ExperienceRepository, StoreError};

use crate::db_err;

pub struct StoreExperienceRepository {
    pool: PgPool,
}

impl StoreExperienceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct ExperienceRow {
    id: Uuid,
    title: String,
    description: String,
    location: String,
    duration: String,
    price_cents: i64,
    rating: f64,
    review_count: i32,
    category: String,
    highlights: Vec<String>,
    included: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<ExperienceRow> for Experience {
    fn from(row: ExperienceRow) -> Self {
        Experience {
            id: row.id,
            title: row.title,
            description: row.description,
            location: row.location,
            duration: row.duration,
            price_cents: row.price_cents,
            rating: row.rating,
            review_count: row.review_count,
            category: row.category,
            highlights: row.highlights,
            included: row.included,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct SlotRow {
    pub(crate) id: Uuid,
    pub(crate) experience_id: Uuid,
    pub(crate) date: NaiveDate,
    pub(crate) time: NaiveTime,
    pub(crate) capacity: i32,
    pub(crate) booked: i32,
    pub(crate) price_modifier_cents: Option<i64>,
}

impl From<SlotRow> for Slot {
    fn from(row: SlotRow) -> Self {
        Slot {
            id: row.id,
            experience_id: row.experience_id,
            date: row.date,
            time: row.time,
            capacity: row.capacity,
            booked: row.booked,
            price_modifier_cents: row.price_modifier_cents,
        }
    }
}

const EXPERIENCE_COLUMNS: &str = "id, title, description, location, duration, price_cents, \
     rating, review_count, category, highlights, included, created_at";

#[async_trait]
impl ExperienceRepository for StoreExperienceRepository {
    async fn list_experiences(&self) -> Result<Vec<Experience>, StoreError> {
        let rows = sqlx::query_as::<_, ExperienceRow>(&format!(
            "SELECT {} FROM experiences ORDER BY created_at DESC",
            EXPERIENCE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Experience::from).collect())
    }

    async fn get_experience(&self, id: Uuid) -> Result<Option<Experience>, StoreError> {
        let row = sqlx::query_as::<_, ExperienceRow>(&format!(
            "SELECT {} FROM experiences WHERE id = $1",
            EXPERIENCE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Experience::from))
    }

    async fn list_upcoming_slots(
        &self,
        experience_id: Uuid,
        from: NaiveDate,
    ) -> Result<Vec<Slot>, StoreError> {
        let rows = sqlx::query_as::<_, SlotRow>(
            r#"
            SELECT id, experience_id, date, time, capacity, booked, price_modifier_cents
            FROM slots
            WHERE experience_id = $1 AND date >= $2
            ORDER BY date ASC, time ASC
            "#,
        )
        .bind(experience_id)
        .bind(from)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Slot::from).collect())
    }
}
