//! In-process [`Database`] implementation.
//!
//! Mirrors the constraints of the PostgreSQL schema: unique URL, unique short
//! code, unique category name, unique membership pair, foreign keys with
//! cascading deletes, and `parent_id` set to null when a parent is deleted.
//! Violations produce the same [`AppError`] values the PostgreSQL gateway
//! produces.
//!
//! A transaction holds the store lock until it is committed or rolled back
//! and works on a private copy of the tables, so concurrent transactions are
//! serialized and uncommitted writes are never visible to other sessions.

mod tables;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::domain::entities::{Category, CategoryPatch, Link, LinkPatch, NewCategory, NewLink};
use crate::domain::repositories::{CategoryRepository, LinkRepository, MembershipRepository};
use crate::domain::unit_of_work::{Database, Transaction, UnitOfWork};
use crate::error::AppError;

use tables::Tables;

/// Shared in-memory store. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

enum Mode {
    Pooled(Arc<Mutex<Tables>>),
    Transaction {
        committed: OwnedMutexGuard<Tables>,
        working: Tables,
    },
}

/// Session over [`MemoryDatabase`], either pooled or transactional.
pub struct MemorySession {
    mode: Mode,
}

impl MemorySession {
    async fn with_tables<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Tables) -> R + Send,
    {
        match &mut self.mode {
            Mode::Pooled(shared) => {
                let mut guard = shared.lock().await;
                f(&mut guard)
            }
            Mode::Transaction { working, .. } => f(working),
        }
    }
}

#[async_trait]
impl Transaction for MemorySession {
    async fn commit(self) -> Result<(), AppError> {
        if let Mode::Transaction {
            mut committed,
            working,
        } = self.mode
        {
            *committed = working;
        }
        Ok(())
    }

    async fn rollback(self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for MemoryDatabase {
    type Tx = MemorySession;

    async fn begin(&self) -> Result<MemorySession, AppError> {
        let committed = self.tables.clone().lock_owned().await;
        let working = committed.clone();
        Ok(MemorySession {
            mode: Mode::Transaction { committed, working },
        })
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    type Conn = MemorySession;

    async fn connection(&self) -> Result<MemorySession, AppError> {
        Ok(MemorySession {
            mode: Mode::Pooled(self.tables.clone()),
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for MemorySession {
    async fn insert_link(&mut self, new_link: NewLink) -> Result<Link, AppError> {
        self.with_tables(|t| t.insert_link(new_link)).await
    }

    async fn find_link_by_id(&mut self, id: Uuid) -> Result<Option<Link>, AppError> {
        Ok(self.with_tables(|t| t.link(id).cloned()).await)
    }

    async fn find_link_by_url(&mut self, url: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .with_tables(|t| t.links.iter().find(|l| l.url == url).cloned())
            .await)
    }

    async fn find_link_by_code(&mut self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .with_tables(|t| t.links.iter().find(|l| l.short_code == code).cloned())
            .await)
    }

    async fn list_links(&mut self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError> {
        let skip = usize::try_from(offset).unwrap_or(0);
        let take = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .with_tables(|t| {
                t.links_newest_first(|_| true)
                    .into_iter()
                    .skip(skip)
                    .take(take)
                    .collect()
            })
            .await)
    }

    async fn list_uncategorized_links(&mut self) -> Result<Vec<Link>, AppError> {
        Ok(self
            .with_tables(|t| {
                let linked: Vec<Uuid> = t.memberships.iter().map(|(l, _)| *l).collect();
                t.links_newest_first(|l| !linked.contains(&l.id))
            })
            .await)
    }

    async fn update_link(&mut self, id: Uuid, patch: LinkPatch) -> Result<Option<Link>, AppError> {
        Ok(self.with_tables(|t| t.update_link(id, patch)).await)
    }

    async fn delete_link(&mut self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.with_tables(|t| t.delete_link(id)).await)
    }

    async fn count_links(&mut self) -> Result<i64, AppError> {
        Ok(self.with_tables(|t| t.links.len() as i64).await)
    }
}

#[async_trait]
impl CategoryRepository for MemorySession {
    async fn insert_category(&mut self, new_category: NewCategory) -> Result<Category, AppError> {
        self.with_tables(|t| t.insert_category(new_category)).await
    }

    async fn find_category_by_id(&mut self, id: Uuid) -> Result<Option<Category>, AppError> {
        Ok(self.with_tables(|t| t.category(id).cloned()).await)
    }

    async fn find_category_by_name(&mut self, name: &str) -> Result<Option<Category>, AppError> {
        Ok(self
            .with_tables(|t| t.categories.iter().find(|c| c.name == name).cloned())
            .await)
    }

    async fn list_categories(&mut self) -> Result<Vec<Category>, AppError> {
        Ok(self.with_tables(|t| t.categories_by_name(|_| true)).await)
    }

    async fn list_root_categories(&mut self) -> Result<Vec<Category>, AppError> {
        Ok(self.with_tables(|t| t.categories_by_name(Category::is_root)).await)
    }

    async fn list_child_categories(&mut self, parent_id: Uuid) -> Result<Vec<Category>, AppError> {
        Ok(self
            .with_tables(|t| t.categories_by_name(|c| c.parent_id == Some(parent_id)))
            .await)
    }

    async fn update_category(
        &mut self,
        id: Uuid,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, AppError> {
        self.with_tables(|t| t.update_category(id, patch)).await
    }

    async fn delete_category(&mut self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.with_tables(|t| t.delete_category(id)).await)
    }

    async fn category_exists_by_name(&mut self, name: &str) -> Result<bool, AppError> {
        Ok(self
            .with_tables(|t| t.categories.iter().any(|c| c.name == name))
            .await)
    }

    async fn category_exists_by_id(&mut self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.with_tables(|t| t.category(id).is_some()).await)
    }

    async fn count_categories(&mut self) -> Result<i64, AppError> {
        Ok(self.with_tables(|t| t.categories.len() as i64).await)
    }
}

#[async_trait]
impl MembershipRepository for MemorySession {
    async fn category_ids_for_link(&mut self, link_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        Ok(self
            .with_tables(|t| {
                t.memberships
                    .iter()
                    .filter(|(l, _)| *l == link_id)
                    .map(|(_, c)| *c)
                    .collect()
            })
            .await)
    }

    async fn categories_for_link(&mut self, link_id: Uuid) -> Result<Vec<Category>, AppError> {
        Ok(self
            .with_tables(|t| {
                t.categories_by_name(|c| t.memberships.contains(&(link_id, c.id)))
            })
            .await)
    }

    async fn links_for_category(&mut self, category_id: Uuid) -> Result<Vec<Link>, AppError> {
        Ok(self
            .with_tables(|t| t.links_newest_first(|l| t.memberships.contains(&(l.id, category_id))))
            .await)
    }

    async fn add_link_categories(
        &mut self,
        link_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<(), AppError> {
        self.with_tables(|t| t.add_memberships(link_id, category_ids))
            .await
    }

    async fn merge_link_categories(
        &mut self,
        link_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<u64, AppError> {
        self.with_tables(|t| t.merge_memberships(link_id, category_ids))
            .await
    }

    async fn remove_link_categories(
        &mut self,
        link_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<u64, AppError> {
        Ok(self
            .with_tables(|t| t.remove_memberships(link_id, category_ids))
            .await)
    }

    async fn count_memberships(&mut self) -> Result<i64, AppError> {
        Ok(self.with_tables(|t| t.memberships.len() as i64).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        CATEGORY_NAME_CONSTRAINT, LINK_SHORT_CODE_CONSTRAINT, LINK_URL_CONSTRAINT,
    };

    fn new_link(url: &str, code: &str) -> NewLink {
        NewLink {
            url: url.to_string(),
            title: "Example".to_string(),
            description: "An example website".to_string(),
            short_code: code.to_string(),
        }
    }

    fn new_category(name: &str, parent_id: Option<Uuid>) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: None,
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_unique_url_and_code() {
        let db = MemoryDatabase::new();
        let mut conn = db.connection().await.unwrap();

        conn.insert_link(new_link("https://a.com", "aaaaaaaa"))
            .await
            .unwrap();

        let err = conn
            .insert_link(new_link("https://a.com", "bbbbbbbb"))
            .await
            .unwrap_err();
        assert!(err.is_conflict_on(LINK_URL_CONSTRAINT));

        let err = conn
            .insert_link(new_link("https://b.com", "aaaaaaaa"))
            .await
            .unwrap_err();
        assert!(err.is_conflict_on(LINK_SHORT_CODE_CONSTRAINT));
    }

    #[tokio::test]
    async fn test_unique_category_name() {
        let db = MemoryDatabase::new();
        let mut conn = db.connection().await.unwrap();

        conn.insert_category(new_category("Rust", None)).await.unwrap();
        let err = conn
            .insert_category(new_category("Rust", None))
            .await
            .unwrap_err();

        assert!(err.is_conflict_on(CATEGORY_NAME_CONSTRAINT));
    }

    #[tokio::test]
    async fn test_membership_foreign_key() {
        let db = MemoryDatabase::new();
        let mut conn = db.connection().await.unwrap();
        let link = conn
            .insert_link(new_link("https://a.com", "aaaaaaaa"))
            .await
            .unwrap();

        let err = conn
            .add_link_categories(link.id, &[Uuid::new_v4()])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(conn.count_memberships().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_merge_memberships_skips_existing_pairs() {
        let db = MemoryDatabase::new();
        let mut conn = db.connection().await.unwrap();
        let link = conn
            .insert_link(new_link("https://a.com", "aaaaaaaa"))
            .await
            .unwrap();
        let rust = conn.insert_category(new_category("Rust", None)).await.unwrap();
        let web = conn.insert_category(new_category("Web", None)).await.unwrap();

        conn.add_link_categories(link.id, &[rust.id]).await.unwrap();
        let err = conn
            .add_link_categories(link.id, &[rust.id])
            .await
            .unwrap_err();
        assert!(err.is_conflict_on("link_categories_pkey"));

        let inserted = conn
            .merge_link_categories(link.id, &[rust.id, web.id])
            .await
            .unwrap();
        assert_eq!(inserted, 1);
        assert_eq!(
            conn.merge_link_categories(link.id, &[rust.id, web.id])
                .await
                .unwrap(),
            0
        );
        assert_eq!(conn.count_memberships().await.unwrap(), 2);

        let err = conn
            .merge_link_categories(link.id, &[Uuid::new_v4()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let db = MemoryDatabase::new();
        let mut conn = db.connection().await.unwrap();
        let parent = conn.insert_category(new_category("Parent", None)).await.unwrap();
        let child = conn
            .insert_category(new_category("Child", Some(parent.id)))
            .await
            .unwrap();
        let link = conn
            .insert_link(new_link("https://a.com", "aaaaaaaa"))
            .await
            .unwrap();
        conn.add_link_categories(link.id, &[parent.id, child.id])
            .await
            .unwrap();

        assert!(conn.delete_category(parent.id).await.unwrap());

        let child = conn.find_category_by_id(child.id).await.unwrap().unwrap();
        assert!(child.is_root());
        assert_eq!(
            conn.category_ids_for_link(link.id).await.unwrap(),
            vec![child.id]
        );

        assert!(conn.delete_link(link.id).await.unwrap());
        assert_eq!(conn.count_memberships().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transaction_commit_and_rollback() {
        let db = MemoryDatabase::new();

        let mut tx = db.begin().await.unwrap();
        tx.insert_link(new_link("https://a.com", "aaaaaaaa"))
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        let mut conn = db.connection().await.unwrap();
        assert_eq!(conn.count_links().await.unwrap(), 0);

        let mut tx = db.begin().await.unwrap();
        tx.insert_link(new_link("https://a.com", "aaaaaaaa"))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(conn.count_links().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_returns_none() {
        let db = MemoryDatabase::new();
        let mut conn = db.connection().await.unwrap();

        let updated = conn
            .update_link(Uuid::new_v4(), LinkPatch::default())
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(!conn.delete_link(Uuid::new_v4()).await.unwrap());
    }
}
