//! PostgreSQL implementation of category repository.

use std::ops::DerefMut;

use async_trait::async_trait;
use sqlx::PgConnection;
use uuid::Uuid;

use super::PgSession;
use super::rows::{CATEGORY_COLUMNS, CategoryRow};
use crate::domain::entities::{Category, CategoryPatch, NewCategory};
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;

#[async_trait]
impl<C> CategoryRepository for PgSession<C>
where
    C: DerefMut<Target = PgConnection> + Send,
{
    async fn insert_category(&mut self, new_category: NewCategory) -> Result<Category, AppError> {
        let sql = format!(
            "INSERT INTO categories (name, description, parent_id)
             VALUES ($1, $2, $3)
             RETURNING {CATEGORY_COLUMNS}"
        );

        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(new_category.name)
            .bind(new_category.description)
            .bind(new_category.parent_id)
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(row.into())
    }

    async fn find_category_by_id(&mut self, id: Uuid) -> Result<Option<Category>, AppError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");

        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(Category::from))
    }

    async fn find_category_by_name(&mut self, name: &str) -> Result<Option<Category>, AppError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = $1");

        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(name)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(Category::from))
    }

    async fn list_categories(&mut self) -> Result<Vec<Category>, AppError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name");

        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn list_root_categories(&mut self) -> Result<Vec<Category>, AppError> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id IS NULL ORDER BY name"
        );

        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn list_child_categories(&mut self, parent_id: Uuid) -> Result<Vec<Category>, AppError> {
        let sql =
            format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id = $1 ORDER BY name");

        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(parent_id)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn update_category(
        &mut self,
        id: Uuid,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, AppError> {
        // $3/$5 say whether the nullable column is being written at all.
        let sql = format!(
            "UPDATE categories
             SET name = COALESCE($2, name),
                 description = CASE WHEN $3 THEN $4 ELSE description END,
                 parent_id = CASE WHEN $5 THEN $6 ELSE parent_id END,
                 updated_at = now()
             WHERE id = $1
             RETURNING {CATEGORY_COLUMNS}"
        );

        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.description.is_some())
            .bind(patch.description.flatten())
            .bind(patch.parent_id.is_some())
            .bind(patch.parent_id.flatten())
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(Category::from))
    }

    async fn delete_category(&mut self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn category_exists_by_name(&mut self, name: &str) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1)")
                .bind(name)
                .fetch_one(&mut *self.conn)
                .await?;

        Ok(exists)
    }

    async fn category_exists_by_id(&mut self, id: Uuid) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *self.conn)
                .await?;

        Ok(exists)
    }

    async fn count_categories(&mut self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}
