use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable travel experience as listed in the storefront catalog.
///
/// Experiences are created and edited by back-office tooling; the booking
/// flow only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Display duration, e.g. "3 hours" or "Full day".
    pub duration: String,
    /// Per-guest base rate in cents.
    pub price_cents: i64,
    pub rating: f64,
    pub review_count: i32,
    pub category: String,
    pub highlights: Vec<String>,
    pub included: Vec<String>,
    pub created_at: DateTime<Utc>,
}
