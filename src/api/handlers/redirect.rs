//! Handler for short code redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::domain::unit_of_work::Database;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its stored URL.
///
/// # Endpoint
///
/// `GET /api/v1/link/r/{shortUrl}`
///
/// Answers `301 Moved Permanently` with the stored URL in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler<D: Database>(
    State(state): State<AppState<D>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&code).await?;
    tracing::debug!(code = %code, link_id = %link.id, "Redirecting");

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, link.url)]))
}
