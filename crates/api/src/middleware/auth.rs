//! # Actor Identity
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! user's id in the `X-User-Id` header. Handlers that act on behalf of a
//! user take an [`Actor`] argument, which rejects the request with 401 when
//! the header is missing or is not a UUID.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use super::error_handling::error_response;

pub const ACTOR_HEADER: &str = "x-user-id";

/// The authenticated user performing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRejection {
    Missing,
    Malformed,
}

impl IntoResponse for ActorRejection {
    fn into_response(self) -> Response {
        let message = match self {
            ActorRejection::Missing => "Missing X-User-Id header",
            ActorRejection::Malformed => "X-User-Id header must be a UUID",
        };
        error_response(StatusCode::UNAUTHORIZED, "unauthenticated", message)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ActorRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(ACTOR_HEADER)
            .ok_or(ActorRejection::Missing)?;

        value
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .map(Actor)
            .ok_or(ActorRejection::Malformed)
    }
}
