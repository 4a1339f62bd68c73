//! Repository trait for link ↔ category memberships.

use crate::domain::entities::{Category, Link};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for the many-to-many relation between links and
/// categories.
///
/// Batch operations act on a whole id set in one statement.
#[async_trait]
pub trait MembershipRepository: Send {
    /// Returns the ids of every category the link belongs to.
    async fn category_ids_for_link(&mut self, link_id: Uuid) -> Result<Vec<Uuid>, AppError>;

    /// Returns every category the link belongs to, ordered by name.
    async fn categories_for_link(&mut self, link_id: Uuid) -> Result<Vec<Category>, AppError>;

    /// Returns every link in the category, newest first.
    async fn links_for_category(&mut self, category_id: Uuid) -> Result<Vec<Link>, AppError>;

    /// Adds the link to each category in `category_ids`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if any id references no category.
    /// Returns [`AppError::Conflict`] if a pair already exists.
    async fn add_link_categories(
        &mut self,
        link_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<(), AppError>;

    /// Adds the link to each category in `category_ids`, skipping pairs that
    /// already exist.
    ///
    /// Returns the number of memberships inserted. Safe to run concurrently
    /// for the same pairs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if any id references no category.
    async fn merge_link_categories(
        &mut self,
        link_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<u64, AppError>;

    /// Removes the link from each category in `category_ids`.
    ///
    /// Returns the number of memberships removed.
    async fn remove_link_categories(
        &mut self,
        link_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<u64, AppError>;

    async fn count_memberships(&mut self) -> Result<i64, AppError>;
}
