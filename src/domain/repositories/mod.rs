//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete gateways in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - A single gateway type implements all of them, see [`Session`]
//! - Implementations live in `crate::infrastructure::persistence` and
//!   `crate::infrastructure::memory`
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link CRUD operations
//! - [`CategoryRepository`] - Category CRUD and hierarchy queries
//! - [`MembershipRepository`] - Link ↔ category relation
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod category_repository;
pub mod link_repository;
pub mod membership_repository;

pub use category_repository::{CATEGORY_NAME_CONSTRAINT, CategoryRepository};
pub use link_repository::{LINK_SHORT_CODE_CONSTRAINT, LINK_URL_CONSTRAINT, LinkRepository};
pub use membership_repository::MembershipRepository;

/// Full data access surface of one connection or one open transaction.
///
/// Implemented automatically for every type that implements all three
/// repository traits.
pub trait Session: LinkRepository + CategoryRepository + MembershipRepository {}

impl<T> Session for T where T: LinkRepository + CategoryRepository + MembershipRepository {}
