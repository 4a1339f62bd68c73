//! CORS policy restricted to configured origins.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Creates a CORS layer allowing only `allowed_origins`.
///
/// Invalid origins are logged and skipped.
///
/// # Allowed
///
/// - Methods: `GET`, `POST`, `PUT`, `DELETE`, `OPTIONS`
/// - Headers: `Content-Type`, `Authorization`, `Accept`
pub fn layer(allowed_origins: &[String]) -> CorsLayer {
    let mut parsed = Vec::with_capacity(allowed_origins.len());
    for origin in allowed_origins {
        match HeaderValue::from_str(origin) {
            Ok(value) => parsed.push(value),
            Err(err) => tracing::warn!("Ignoring invalid CORS origin '{origin}': {err}"),
        }
    }

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(parsed)
}
