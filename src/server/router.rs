use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{chat, documents, health};
use crate::state::AppState;

/// Main application router.
///
/// CORS is fully permissive: this service has no credentialed surface, so
/// any origin may call it.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/chat", post(chat::chat))
        .route("/api/generate_document", post(documents::generate_document))
        .with_state(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}
