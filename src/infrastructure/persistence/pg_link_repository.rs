//! PostgreSQL implementation of link repository.

use std::ops::DerefMut;

use async_trait::async_trait;
use sqlx::PgConnection;
use uuid::Uuid;

use super::PgSession;
use super::rows::{LINK_COLUMNS, LinkRow};
use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[async_trait]
impl<C> LinkRepository for PgSession<C>
where
    C: DerefMut<Target = PgConnection> + Send,
{
    async fn insert_link(&mut self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (url, title, description, short_code)
             VALUES ($1, $2, $3, $4)
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(new_link.url)
            .bind(new_link.title)
            .bind(new_link.description)
            .bind(new_link.short_code)
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(row.into())
    }

    async fn find_link_by_id(&mut self, id: Uuid) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(Link::from))
    }

    async fn find_link_by_url(&mut self, url: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE url = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(url)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(Link::from))
    }

    async fn find_link_by_code(&mut self, code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(code)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(Link::from))
    }

    async fn list_links(&mut self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links
             ORDER BY created_at DESC, id
             LIMIT $1 OFFSET $2"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn list_uncategorized_links(&mut self) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links l
             WHERE NOT EXISTS (
                 SELECT 1 FROM link_categories lc WHERE lc.link_id = l.id
             )
             ORDER BY created_at DESC, id"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn update_link(&mut self, id: Uuid, patch: LinkPatch) -> Result<Option<Link>, AppError> {
        let sql = format!(
            "UPDATE links
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 updated_at = now()
             WHERE id = $1
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(Link::from))
    }

    async fn delete_link(&mut self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_links(&mut self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}
