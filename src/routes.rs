use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/translate", post(handlers::translate))
        .route("/api/health", get(handlers::health_check))
}
