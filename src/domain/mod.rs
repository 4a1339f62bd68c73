//! Domain layer containing business entities and data access contracts.
//!
//! This module is independent of infrastructure concerns. It defines what the
//! service stores and the traits the storage gateways must satisfy.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`unit_of_work`] - Transaction boundary and the [`unit_of_work::Database`] handle
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod repositories;
pub mod unit_of_work;
