//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Link`] - A stored URL with its short code
//! - [`Category`] - A named, optionally nested grouping of links
//!
//! Memberships (link ↔ category pairs) have no entity of their own; they are
//! read and written through [`crate::domain::repositories::MembershipRepository`].
//!
//! # Design Pattern
//!
//! Separate structs are used for creation and partial updates:
//! - `NewLink`, `NewCategory` - For creating new records
//! - `LinkPatch`, `CategoryPatch` - For partial updates

pub mod category;
pub mod link;

pub use category::{Category, CategoryPatch, NewCategory};
pub use link::{Link, LinkPatch, NewLink};
