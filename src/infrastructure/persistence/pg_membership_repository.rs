//! PostgreSQL implementation of the link ↔ category relation.

use std::ops::DerefMut;

use async_trait::async_trait;
use sqlx::PgConnection;
use uuid::Uuid;

use super::PgSession;
use super::rows::{CategoryRow, LinkRow};
use crate::domain::entities::{Category, Link};
use crate::domain::repositories::MembershipRepository;
use crate::error::AppError;

#[async_trait]
impl<C> MembershipRepository for PgSession<C>
where
    C: DerefMut<Target = PgConnection> + Send,
{
    async fn category_ids_for_link(&mut self, link_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT category_id FROM link_categories WHERE link_id = $1",
        )
        .bind(link_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(ids)
    }

    async fn categories_for_link(&mut self, link_id: Uuid) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT c.id, c.name, c.description, c.parent_id, c.created_at, c.updated_at
             FROM categories c
             JOIN link_categories lc ON lc.category_id = c.id
             WHERE lc.link_id = $1
             ORDER BY c.name",
        )
        .bind(link_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn links_for_category(&mut self, category_id: Uuid) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            "SELECT l.id, l.url, l.title, l.description, l.short_code, l.created_at, l.updated_at
             FROM links l
             JOIN link_categories lc ON lc.link_id = l.id
             WHERE lc.category_id = $1
             ORDER BY l.created_at DESC, l.id",
        )
        .bind(category_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn add_link_categories(
        &mut self,
        link_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<(), AppError> {
        if category_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO link_categories (link_id, category_id)
             SELECT $1, UNNEST($2::uuid[])",
        )
        .bind(link_id)
        .bind(category_ids)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    async fn merge_link_categories(
        &mut self,
        link_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<u64, AppError> {
        if category_ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            "INSERT INTO link_categories (link_id, category_id)
             SELECT $1, UNNEST($2::uuid[])
             ON CONFLICT (link_id, category_id) DO NOTHING",
        )
        .bind(link_id)
        .bind(category_ids)
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected())
    }

    async fn remove_link_categories(
        &mut self,
        link_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<u64, AppError> {
        if category_ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            "DELETE FROM link_categories WHERE link_id = $1 AND category_id = ANY($2)",
        )
        .bind(link_id)
        .bind(category_ids)
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected())
    }

    async fn count_memberships(&mut self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM link_categories")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}
