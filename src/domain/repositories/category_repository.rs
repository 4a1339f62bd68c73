//! Repository trait for category data access.

use crate::domain::entities::{Category, CategoryPatch, NewCategory};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Store constraint guarding category name uniqueness.
pub const CATEGORY_NAME_CONSTRAINT: &str = "categories_name_key";

/// Repository interface for managing categories.
///
/// Listing methods return categories ordered by name.
#[async_trait]
pub trait CategoryRepository: Send {
    /// Inserts a new category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] carrying [`CATEGORY_NAME_CONSTRAINT`]
    /// if the name is taken.
    /// Returns [`AppError::Validation`] if `parent_id` references nothing.
    async fn insert_category(&mut self, new_category: NewCategory) -> Result<Category, AppError>;

    async fn find_category_by_id(&mut self, id: Uuid) -> Result<Option<Category>, AppError>;

    async fn find_category_by_name(&mut self, name: &str) -> Result<Option<Category>, AppError>;

    async fn list_categories(&mut self) -> Result<Vec<Category>, AppError>;

    /// Lists categories without a parent.
    async fn list_root_categories(&mut self) -> Result<Vec<Category>, AppError>;

    /// Lists the direct children of `parent_id`.
    async fn list_child_categories(&mut self, parent_id: Uuid) -> Result<Vec<Category>, AppError>;

    /// Partially updates a category and refreshes `updated_at`.
    ///
    /// Returns `Ok(None)` if no category has the given id.
    async fn update_category(
        &mut self,
        id: Uuid,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, AppError>;

    /// Deletes a category. Memberships go with it; children become roots.
    ///
    /// Returns `Ok(true)` if a row was removed.
    async fn delete_category(&mut self, id: Uuid) -> Result<bool, AppError>;

    async fn category_exists_by_name(&mut self, name: &str) -> Result<bool, AppError>;

    async fn category_exists_by_id(&mut self, id: Uuid) -> Result<bool, AppError>;

    async fn count_categories(&mut self) -> Result<i64, AppError>;
}
