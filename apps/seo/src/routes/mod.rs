pub mod handlers;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API (needs the language model)
        .route("/api/v1/keywords", post(generation::handle_extract_keywords))
        .route("/api/v1/articles", post(generation::handle_generate_article))
        // Scoring and export
        .route("/api/v1/evaluate", post(handlers::handle_evaluate))
        .route("/api/v1/export", post(handlers::handle_export))
        .with_state(state)
}
