//! Category management service.

use crate::domain::entities::{Category, CategoryPatch, Link, NewCategory};
use crate::domain::repositories::{
    CATEGORY_NAME_CONSTRAINT, CategoryRepository, MembershipRepository,
};
use crate::domain::unit_of_work::Database;
use crate::error::AppError;
use serde_json::json;
use uuid::Uuid;

/// Service for managing categories and their one-level hierarchy.
///
/// Handles CRUD with validation to ensure:
/// - Unique category names
/// - Existing parent categories
/// - No category is its own parent
pub struct CategoryService<D: Database> {
    db: D,
}

impl<D: Database> CategoryService<D> {
    /// Creates a new category service.
    pub fn new(db: D) -> Self {
        Self { db }
    }

    /// Creates a new category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is taken.
    /// Returns [`AppError::Validation`] if the parent does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(&self, new_category: NewCategory) -> Result<Category, AppError> {
        let mut conn = self.db.connection().await?;

        if conn.category_exists_by_name(&new_category.name).await? {
            return Err(name_taken(&new_category.name));
        }

        if let Some(parent_id) = new_category.parent_id
            && !conn.category_exists_by_id(parent_id).await?
        {
            return Err(parent_missing(parent_id));
        }

        let name = new_category.name.clone();
        let created = conn
            .insert_category(new_category)
            .await
            .map_err(|e| map_name_conflict(e, &name))?;

        tracing::info!(category_id = %created.id, name = %created.name, "Category created");
        Ok(created)
    }

    /// Lists all categories ordered by name.
    pub async fn list_all(&self) -> Result<Vec<Category>, AppError> {
        self.db.connection().await?.list_categories().await
    }

    /// Lists categories without a parent.
    pub async fn list_roots(&self) -> Result<Vec<Category>, AppError> {
        self.db.connection().await?.list_root_categories().await
    }

    /// Lists the direct children of a category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the parent does not exist.
    pub async fn list_children(&self, parent_id: Uuid) -> Result<Vec<Category>, AppError> {
        let mut conn = self.db.connection().await?;

        if !conn.category_exists_by_id(parent_id).await? {
            return Err(category_not_found(parent_id));
        }

        conn.list_child_categories(parent_id).await
    }

    /// Retrieves a category by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn get(&self, id: Uuid) -> Result<Category, AppError> {
        self.db
            .connection()
            .await?
            .find_category_by_id(id)
            .await?
            .ok_or_else(|| category_not_found(id))
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    /// Returns [`AppError::Validation`] if the category would become its own
    /// parent or the new parent does not exist.
    /// Returns [`AppError::Conflict`] if the new name belongs to another category.
    pub async fn update(&self, id: Uuid, patch: CategoryPatch) -> Result<Category, AppError> {
        if patch.parent_id == Some(Some(id)) {
            return Err(AppError::bad_request(
                "Category cannot be its own parent",
                json!({ "category_id": id }),
            ));
        }

        let mut conn = self.db.connection().await?;

        if conn.find_category_by_id(id).await?.is_none() {
            return Err(category_not_found(id));
        }

        if let Some(name) = &patch.name
            && let Some(other) = conn.find_category_by_name(name).await?
            && other.id != id
        {
            return Err(name_taken(name));
        }

        if let Some(Some(parent_id)) = patch.parent_id
            && !conn.category_exists_by_id(parent_id).await?
        {
            return Err(parent_missing(parent_id));
        }

        let name = patch.name.clone().unwrap_or_default();
        let updated = conn
            .update_category(id, patch)
            .await
            .map_err(|e| map_name_conflict(e, &name))?
            .ok_or_else(|| category_not_found(id))?;

        tracing::info!(category_id = %id, "Category updated");
        Ok(updated)
    }

    /// Deletes a category.
    ///
    /// Its memberships are removed and its children become roots.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.db.connection().await?.delete_category(id).await?;
        if !deleted {
            return Err(category_not_found(id));
        }

        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }

    /// Lists the links in a category, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn links(&self, id: Uuid) -> Result<Vec<Link>, AppError> {
        let mut conn = self.db.connection().await?;

        if !conn.category_exists_by_id(id).await? {
            return Err(category_not_found(id));
        }

        conn.links_for_category(id).await
    }
}

fn category_not_found(id: Uuid) -> AppError {
    AppError::not_found("Category not found", json!({ "category_id": id }))
}

fn parent_missing(parent_id: Uuid) -> AppError {
    AppError::bad_request(
        "Parent category does not exist",
        json!({ "parent_id": parent_id }),
    )
}

fn name_taken(name: &str) -> AppError {
    AppError::conflict(
        "Category with this name already exists",
        json!({ "name": name }),
    )
}

/// Rewrites a raw unique violation on the name into the service's message.
fn map_name_conflict(err: AppError, name: &str) -> AppError {
    if err.is_conflict_on(CATEGORY_NAME_CONSTRAINT) {
        name_taken(name)
    } else {
        err
    }
}
