use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/mentors", post(handlers::mentor::register_mentor))
        .route("/api/mentors/:mentor_id", get(handlers::mentor::get_mentor))
}
