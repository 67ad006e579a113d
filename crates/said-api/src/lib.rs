//! # said-api — Axum API Service for ID Number Decoding
//!
//! Exposes the said-core decoder over HTTP, together with the payload
//! contracts of the display widgets and an in-memory reference counter.
//!
//! ## API Surface
//!
//! | Prefix             | Module                  |
//! |--------------------|-------------------------|
//! | `/health/*`        | liveness and readiness  |
//! | `/v1/id-numbers/*` | [`routes::id_numbers`]  |
//!
//! Every request passes through `TraceLayer`.

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::id_numbers::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe. Always 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. The service has no external dependencies to wait for.
async fn readiness() -> &'static str {
    "ready"
}
