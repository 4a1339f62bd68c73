//! Greeting endpoints and the 404 fallback.

use axum::{Json, http::Uri};
use serde_json::json;

use crate::api::dto::health::MessageResponse;
use crate::error::AppError;

/// `GET /`
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Refero API".to_string(),
    })
}

/// `GET /api/v1`
pub async fn api_root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Refero API v1".to_string(),
    })
}

/// Answers every unmatched route with 404 `{"error": "route not found"}`.
pub async fn fallback_handler(uri: Uri) -> AppError {
    AppError::not_found("route not found", json!({ "path": uri.path() }))
}
