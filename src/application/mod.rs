//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! transactions and business rules. Services are generic over
//! [`crate::domain::unit_of_work::Database`] and provide a clean API for HTTP
//! handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, deduplication and
//!   category reconciliation
//! - [`services::category_service::CategoryService`] - Category management

pub mod services;
