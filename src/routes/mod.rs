//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTML page lives at `/` and posts back to itself. `/api/generate` is a
//! stateless JSON surface over the same generation service, and `/healthz`
//! answers liveness checks. Every route shares one `AppState`.

pub mod api;
pub mod page;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::show).post(page::submit))
        .route("/api/generate", post(api::generate))
        .route("/healthz", get(healthz))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
