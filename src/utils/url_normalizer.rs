//! URL normalization for incoming links.
//!
//! The normalized string is both the deduplication key and the stored value,
//! so it must be produced the same way on every path.

use url::Url;

const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Normalizes a submitted URL.
///
/// # Normalization Rules
///
/// 1. Surrounding whitespace is trimmed; control characters left inside
///    are rejected
/// 2. Inputs without an `http://` or `https://` prefix (any case) get `https://`
/// 3. The result must parse and carry a host
/// 4. Otherwise the text is kept as submitted: no case folding, no port or
///    fragment stripping
///
/// # Errors
///
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for other explicit
/// schemes such as `ftp://`.
/// Returns [`UrlNormalizationError::InvalidFormat`] when the URL contains a
/// control character, does not parse or has no host.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com");
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }
    // The URL parser drops tabs and newlines silently, but the text is stored as is.
    if trimmed.chars().any(char::is_control) {
        return Err(UrlNormalizationError::InvalidFormat(
            "control characters are not allowed".to_string(),
        ));
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else if trimmed.contains("://") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    };

    let parsed =
        Url::parse(&candidate).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::InvalidFormat(
            "missing host".to_string(),
        ));
    }

    Ok(candidate)
}

fn has_http_scheme(value: &str) -> bool {
    let lower = value
        .get(..DEFAULT_SCHEME_PREFIX.len())
        .unwrap_or(value)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
