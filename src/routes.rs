//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /`        - Greeting
//! - `GET /health`  - Database health check
//! - `/api/v1/*`    - REST API (links, categories, redirects)
//! - anything else  - 404 `{"error": "route not found"}`
//!
//! # Middleware
//!
//! - **Panic recovery** - Panics become 500 JSON responses
//! - **CORS** - Restricted to configured origins
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{fallback_handler, health_handler, root_handler};
use crate::api::middleware::{cors, recovery, tracing};
use crate::api::routes::api_routes;
use crate::domain::unit_of_work::Database;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_allowed_origins` - origins allowed by the CORS layer
pub fn app_router<D: Database>(
    state: AppState<D>,
    cors_allowed_origins: &[String],
) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, cors_allowed_origins))
}

/// The routed application before path normalization.
pub fn router<D: Database>(state: AppState<D>, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler::<D>))
        .nest("/api/v1", api_routes::<D>())
        .fallback(fallback_handler)
        .with_state(state)
        .layer(recovery::layer())
        .layer(cors::layer(cors_allowed_origins))
        .layer(tracing::layer())
}
