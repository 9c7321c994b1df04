use axum::{
    Json,
    extract::State,
};
use mentorbook_core::models::{
    availability::{AvailabilityWindowsResponse, ReplaceAvailabilityRequest},
    slot::SlotsResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::Actor,
        error_handling::AppError,
        extract::{ApiJson, ApiPath, ApiQuery},
    },
};

/// Query parameters for slot listing. Both fall back to the configured
/// defaults.
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub days: Option<u32>,
    pub duration: Option<i32>,
}

#[axum::debug_handler]
pub async fn get_availability_windows(
    State(state): State<Arc<ApiState>>,
    ApiPath(mentor_id): ApiPath<Uuid>,
) -> Result<Json<AvailabilityWindowsResponse>, AppError> {
    let availabilities = state.service.availability_windows(mentor_id).await?;

    Ok(Json(AvailabilityWindowsResponse { availabilities }))
}

/// Replaces every window of the mentor with the submitted list.
#[axum::debug_handler]
pub async fn replace_availability_windows(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    ApiPath(mentor_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ReplaceAvailabilityRequest>,
) -> Result<Json<AvailabilityWindowsResponse>, AppError> {
    let availabilities = state
        .service
        .replace_availability_windows(actor_id, mentor_id, &payload.availabilities)
        .await?;

    Ok(Json(AvailabilityWindowsResponse { availabilities }))
}

#[axum::debug_handler]
pub async fn list_available_slots(
    State(state): State<Arc<ApiState>>,
    ApiPath(mentor_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let slots = state
        .service
        .list_available_slots(mentor_id, query.days, query.duration, state.now())
        .await?;

    let timezone = state.service.settings().timezone;
    let slots: Vec<_> = slots.iter().map(|slot| slot.to_response(&timezone)).collect();

    Ok(Json(SlotsResponse {
        total: slots.len(),
        slots,
    }))
}
