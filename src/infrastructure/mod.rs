//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL gateway
//! - [`memory`] - In-process store with the same constraint semantics

pub mod memory;
pub mod persistence;
