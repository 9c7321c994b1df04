use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use mentorbook_core::models::mentor::{MentorResponse, RegisterMentorRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::Actor,
        error_handling::AppError,
        extract::{ApiJson, ApiPath},
    },
};

/// Creates the caller's mentor profile.
#[axum::debug_handler]
pub async fn register_mentor(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    ApiJson(payload): ApiJson<RegisterMentorRequest>,
) -> Result<(StatusCode, Json<MentorResponse>), AppError> {
    let mentor = state.service.register_mentor(actor_id, &payload).await?;

    Ok((StatusCode::CREATED, Json(MentorResponse { mentor })))
}

#[axum::debug_handler]
pub async fn get_mentor(
    State(state): State<Arc<ApiState>>,
    ApiPath(mentor_id): ApiPath<Uuid>,
) -> Result<Json<MentorResponse>, AppError> {
    let mentor = state.service.get_mentor(mentor_id).await?;

    Ok(Json(MentorResponse { mentor }))
}
