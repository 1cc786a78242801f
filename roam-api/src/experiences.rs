use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use roam_catalog::{Experience, Slot};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ExperienceWithSlots {
    #[serde(flatten)]
    experience: Experience,
    slots: Vec<Slot>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/experiences", get(list_experiences))
        .route("/v1/experiences/{id}", get(get_experience))
}

async fn list_experiences(
    State(state): State<AppState>,
) -> Result<Json<Vec<Experience>>, AppError> {
    let experiences = state.experiences.list_experiences().await?;
    Ok(Json(experiences))
}

async fn get_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExperienceWithSlots>, AppError> {
    let experience = state
        .experiences
        .get_experience(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))?;

    // only slots that can still be booked
    let slots = state
        .experiences
        .list_upcoming_slots(id, Utc::now().date_naive())
        .await?;

    Ok(Json(ExperienceWithSlots { experience, slots }))
}
