pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog_handlers;
use crate::state::AppState;
use crate::summarize::handlers as summarize_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/books", get(catalog_handlers::handle_list_books))
        .route("/api/books/:id", get(catalog_handlers::handle_get_book))
        .route("/api/summarize", post(summarize_handlers::handle_summarize))
        .with_state(state)
}
