use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/mentors/:mentor_id/bookings",
            post(handlers::booking::book_session),
        )
        .route("/api/bookings", get(handlers::booking::list_sessions))
        .route("/api/bookings/:id", get(handlers::booking::get_session))
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::booking::cancel_session),
        )
        .route(
            "/api/bookings/:id/outcome",
            post(handlers::booking::record_outcome),
        )
}
