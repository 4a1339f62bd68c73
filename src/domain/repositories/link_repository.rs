//! Repository trait for link data access.

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Store constraint guarding the one-link-per-URL rule.
pub const LINK_URL_CONSTRAINT: &str = "links_url_key";

/// Store constraint guarding short code uniqueness.
pub const LINK_SHORT_CODE_CONSTRAINT: &str = "links_short_code_key";

/// Repository interface for managing links.
///
/// Methods take `&mut self` because an implementation is bound to one
/// connection or one open transaction at a time.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSession`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemorySession`] - In-process store for tests
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[async_trait]
pub trait LinkRepository: Send {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] carrying [`LINK_URL_CONSTRAINT`] or
    /// [`LINK_SHORT_CODE_CONSTRAINT`] when a unique rule is violated.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_link(&mut self, new_link: NewLink) -> Result<Link, AppError>;

    async fn find_link_by_id(&mut self, id: Uuid) -> Result<Option<Link>, AppError>;

    /// Finds a link by its exact (already normalized) URL.
    async fn find_link_by_url(&mut self, url: &str) -> Result<Option<Link>, AppError>;

    async fn find_link_by_code(&mut self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists links newest first.
    ///
    /// # Arguments
    ///
    /// - `limit` - Maximum number of items returned
    /// - `offset` - Number of items skipped
    async fn list_links(&mut self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError>;

    /// Lists links that belong to no category, newest first.
    async fn list_uncategorized_links(&mut self) -> Result<Vec<Link>, AppError>;

    /// Partially updates a link and refreshes `updated_at`.
    ///
    /// Returns `Ok(None)` if no link has the given id.
    async fn update_link(&mut self, id: Uuid, patch: LinkPatch) -> Result<Option<Link>, AppError>;

    /// Deletes a link together with its memberships.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if the id was unknown.
    async fn delete_link(&mut self, id: Uuid) -> Result<bool, AppError>;

    async fn count_links(&mut self) -> Result<i64, AppError>;
}
