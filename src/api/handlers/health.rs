//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{
    ComponentCheck, ComponentStatus, HealthChecks, HealthResponse, ServiceStatus,
};
use crate::domain::unit_of_work::Database;
use crate::state::AppState;

/// Pings the database.
///
/// Returns 200 with `"status": "healthy"` when it answers, otherwise 503 with
/// `"status": "degraded"`.
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": { "database": { "status": "ok", "message": "Connected" } }
/// }
/// ```
pub async fn health_handler<D: Database>(
    State(state): State<AppState<D>>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.db.ping().await {
        Ok(()) => ComponentCheck {
            status: ComponentStatus::Ok,
            message: Some("Connected".to_string()),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            ComponentCheck {
                status: ComponentStatus::Error,
                message: Some(e.public_message()),
            }
        }
    };

    let response = HealthResponse::from_checks(HealthChecks { database });
    let code = match response.status {
        ServiceStatus::Healthy => StatusCode::OK,
        ServiceStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    (code, Json(response))
}
