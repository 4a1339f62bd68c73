//! PostgreSQL gateway.
//!
//! A single [`PgSession`] implements every repository trait. It wraps either a
//! pooled connection or an open transaction, so each query runs against an
//! explicit executor and transactional code never reaches for the pool.
//!
//! # Modules
//!
//! - [`pg_database`] - Pool handle, unit of work and transaction commit/rollback
//! - [`pg_link_repository`] - Link queries
//! - [`pg_category_repository`] - Category queries
//! - [`pg_membership_repository`] - Link ↔ category queries

pub mod pg_category_repository;
pub mod pg_database;
pub mod pg_link_repository;
pub mod pg_membership_repository;
mod rows;

pub use pg_database::{PgConnectionSession, PgDatabase, PgSession, PgTransactionSession};
