//! Utility functions shared by the service and HTTP layers.
//!
//! - [`short_code`] - Short code generation
//! - [`url_normalizer`] - URL normalization
//! - [`ids`] - Identifier parsing

pub mod ids;
pub mod short_code;
pub mod url_normalizer;
