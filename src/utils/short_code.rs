//! Short code generation.
//!
//! Codes are derived from the normalized URL, so the same URL always maps to
//! the same code. Uniqueness is left to the store's unique constraint.

use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Number of base64 characters kept from the digest.
pub const SHORT_CODE_LENGTH: usize = 8;

/// Produces the short code for a normalized URL.
#[cfg_attr(test, mockall::automock)]
pub trait ShortCodeGenerator: Send + Sync {
    fn generate(&self, url: &str) -> String;
}

/// Default generator: SHA-256 of the URL, URL-safe base64 without padding,
/// truncated to [`SHORT_CODE_LENGTH`] characters.
///
/// # Examples
///
/// ```ignore
/// let code = Sha256CodeGenerator.generate("https://example.com");
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256CodeGenerator;

impl ShortCodeGenerator for Sha256CodeGenerator {
    fn generate(&self, url: &str) -> String {
        let digest = Sha256::digest(url.as_bytes());
        let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
        code.truncate(SHORT_CODE_LENGTH);
        code
    }
}
