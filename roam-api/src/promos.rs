use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use roam_catalog::{check_promo, pricing};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct ValidatePromoRequest {
    code: String,
    amount_cents: i64,
}

#[derive(Debug, Serialize)]
struct ValidatePromoResponse {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_amount_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ValidatePromoResponse {
    fn invalid(reason: impl ToString) -> Self {
        Self {
            valid: false,
            discount_cents: None,
            final_amount_cents: None,
            error: Some(reason.to_string()),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/promos/validate", post(validate_promo))
}

/// Advisory pre-check for the storefront's checkout form. The amount here is
/// whatever total the client is displaying; the orchestrator re-validates
/// against the server-side amount before anything is persisted.
async fn validate_promo(
    State(state): State<AppState>,
    Json(req): Json<ValidatePromoRequest>,
) -> Result<Json<ValidatePromoResponse>, AppError> {
    let Some(promo) = state.promos.find_by_code(&req.code).await? else {
        return Ok(Json(ValidatePromoResponse::invalid(
            roam_catalog::PromoRejection::NotFound,
        )));
    };

    if let Err(rejection) = check_promo(&promo, req.amount_cents, Utc::now()) {
        return Ok(Json(ValidatePromoResponse::invalid(rejection)));
    }

    let discount_cents = pricing::discount_on(req.amount_cents, &promo);

    Ok(Json(ValidatePromoResponse {
        valid: true,
        discount_cents: Some(discount_cents),
        final_amount_cents: Some(req.amount_cents - discount_cents),
        error: None,
    }))
}
