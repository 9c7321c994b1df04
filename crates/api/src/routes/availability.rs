use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/mentors/:mentor_id/availability-windows",
            get(handlers::availability::get_availability_windows)
                .put(handlers::availability::replace_availability_windows),
        )
        .route(
            "/api/mentors/:mentor_id/slots",
            get(handlers::availability::list_available_slots),
        )
}
