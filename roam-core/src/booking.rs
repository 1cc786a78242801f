use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// A confirmed reservation. Written exactly once per successful checkout and
/// never mutated afterwards; only the status field has other legal values,
/// and nothing in this flow moves it off `confirmed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub experience_id: Uuid,
    pub slot_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub num_guests: i32,
    pub base_amount_cents: i64,
    pub discount_amount_cents: i64,
    pub final_amount_cents: i64,
    pub promo_code: Option<String>,
    pub status: BookingStatus,
    /// `BK` followed by 8 characters from `[A-Z0-9]`, unique per booking.
    pub booking_reference: String,
    pub created_at: DateTime<Utc>,
}

/// What the storefront submits at checkout.
///
/// Deliberately carries no monetary fields: base, discount and final amounts
/// are recomputed server-side from the experience's rate and a fresh promo
/// check, so a tampered client total is never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub experience_id: Uuid,
    pub slot_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub num_guests: i32,
    pub promo_code: Option<String>,
}
