//! Identifier parsing for path and body values.

use crate::error::AppError;
use serde_json::json;
use uuid::Uuid;

/// Parses a UUID, naming the offending field in the error.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with `"<field> must be a valid ID"`.
pub fn parse_id(raw: &str, field: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        AppError::bad_request(
            format!("{field} must be a valid ID"),
            json!({ "field": field, "value": raw }),
        )
    })
}
