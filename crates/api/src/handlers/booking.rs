use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use mentorbook_core::models::booking::{
    BookSessionRequest, BookingStatus, SessionOutcomeRequest, SessionResponse, SessionRole,
    SessionsResponse,
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

#[derive(Debug, Deserialize)]
pub struct SessionsQuery {
    #[serde(default)]
    pub role: SessionRole,
    pub status: Option<BookingStatus>,
}

/// Books a session with the mentor for the calling student.
#[axum::debug_handler]
pub async fn book_session(
    State(state): State<Arc<ApiState>>,
    Actor(student_id): Actor,
    ApiPath(mentor_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<BookSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = state
        .service
        .book_session(student_id, mentor_id, &payload, state.now())
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse { session })))
}

#[axum::debug_handler]
pub async fn list_sessions(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    ApiQuery(query): ApiQuery<SessionsQuery>,
) -> Result<Json<SessionsResponse>, AppError> {
    let sessions = state
        .service
        .list_sessions(actor_id, query.role, query.status)
        .await?;

    Ok(Json(SessionsResponse { sessions }))
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.service.get_session(id, actor_id).await?;

    Ok(Json(SessionResponse { session }))
}

#[axum::debug_handler]
pub async fn cancel_session(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.service.cancel_session(id, actor_id, state.now()).await?;

    Ok(Json(SessionResponse { session }))
}

/// Mentor records whether the session took place.
#[axum::debug_handler]
pub async fn record_outcome(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<SessionOutcomeRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .service
        .record_outcome(id, actor_id, payload.status, state.now())
        .await?;

    Ok(Json(SessionResponse { session }))
}
