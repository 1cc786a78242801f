use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(DiscountType::Percentage),
            "fixed" => Some(DiscountType::Fixed),
            _ => None,
        }
    }
}

/// A marketing promo code. Managed externally; the booking flow only reads
/// these, looked up case-insensitively by code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    /// Whole percent for `Percentage`, cents for `Fixed`.
    pub discount_value: i64,
    pub min_amount_cents: Option<i64>,
    /// Caps percentage discounts only.
    pub max_discount_cents: Option<i64>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub is_active: bool,
}

/// Why a promo code was refused. Each arm carries a message fit to show the
/// customer directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromoRejection {
    #[error("Invalid promo code")]
    NotFound,

    #[error("This promo code has expired")]
    Expired,

    #[error("Minimum purchase of ${} required for this promo code", format_dollars(.minimum_cents))]
    BelowMinimum { minimum_cents: i64 },
}

fn format_dollars(cents: &i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}

/// Check a promo against a purchase amount, short-circuiting on the first
/// failing rule: active, inside its validity window, minimum spend met.
///
/// Advisory when called from the storefront pre-check; the orchestrator runs
/// it again at submission time against the server-side recomputed amount, so
/// a stale client quote can never buy a discount the current total does not
/// earn.
pub fn check_promo(
    promo: &PromoCode,
    amount_cents: i64,
    now: DateTime<Utc>,
) -> Result<(), PromoRejection> {
    if !promo.is_active {
        return Err(PromoRejection::NotFound);
    }

    if now < promo.valid_from || now > promo.valid_until {
        return Err(PromoRejection::Expired);
    }

    if let Some(minimum_cents) = promo.min_amount_cents {
        if amount_cents < minimum_cents {
            return Err(PromoRejection::BelowMinimum { minimum_cents });
        }
    }

    Ok(())
}
