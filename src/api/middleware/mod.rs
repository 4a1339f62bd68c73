//! HTTP middleware for request processing.
//!
//! Provides observability, CORS and panic recovery.

pub mod cors;
pub mod recovery;
pub mod tracing;
