//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a JSON body of the form
//! `{"error": message, "kind": kind}`, so every endpoint fails the same way.
//! Extractor rejections join this path through [`super::extract`].
//!
//! Infrastructure failures (database, internal) are logged here and reach
//! the client only as a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mentorbook_core::errors::MentorError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `MentorError` and implements `IntoResponse`, so handlers
/// can use `?` on any `MentorResult`.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use mentorbook_api::middleware::error_handling::AppError;
/// use mentorbook_core::errors::MentorError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(MentorError::NotFound("Mentor with ID 42 not found".into()).into());
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub MentorError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            MentorError::NotFound(_) => StatusCode::NOT_FOUND,
            MentorError::Validation(_)
            | MentorError::SelfBookingNotAllowed
            | MentorError::PastDateNotAllowed
            | MentorError::InvalidDuration
            | MentorError::AlreadyFinalized(_) => StatusCode::BAD_REQUEST,
            MentorError::Unauthorized(_) => StatusCode::FORBIDDEN,
            MentorError::SlotConflict => StatusCode::CONFLICT,
            MentorError::Database(_) | MentorError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if self.0.is_expected() {
            self.0.to_string()
        } else {
            tracing::error!(error = %self.0, kind = self.0.kind(), "Request failed");
            "Internal server error".to_string()
        };

        error_response(status, self.0.kind(), message)
    }
}

/// JSON error body shared by domain errors and extractor rejections.
pub fn error_response(status: StatusCode, kind: &str, message: impl Into<String>) -> Response {
    let body = Json(json!({ "error": message.into(), "kind": kind }));
    (status, body).into_response()
}

impl From<MentorError> for AppError {
    fn from(err: MentorError) -> Self {
        AppError(err)
    }
}

/// Repository errors surfacing outside a store are database failures.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(MentorError::Database(err))
    }
}
