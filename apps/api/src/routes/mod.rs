pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::search::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_form))
        .route("/health", get(health::health_handler))
        // Candidate Search API
        .route("/api/v1/candidates/search", post(handlers::handle_search))
        .route(
            "/api/v1/exports/:file_name",
            get(handlers::handle_download),
        )
        .with_state(state)
}
