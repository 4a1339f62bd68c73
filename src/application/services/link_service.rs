//! Link creation, category reconciliation and retrieval.
//!
//! Every write that touches more than one table runs in a single
//! transaction via [`run_in_transaction`].

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{Category, Link, LinkPatch, NewLink};
use crate::domain::repositories::{
    LINK_SHORT_CODE_CONSTRAINT, LINK_URL_CONSTRAINT, LinkRepository, MembershipRepository,
};
use crate::domain::unit_of_work::{Database, run_in_transaction};
use crate::error::AppError;
use crate::utils::short_code::ShortCodeGenerator;
use crate::utils::url_normalizer::normalize_url;

/// Insert attempts for one create when the conflicting row has disappeared.
const CREATE_ATTEMPTS: usize = 2;

/// Input for [`LinkService::create`].
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub url: String,
    pub title: String,
    pub description: String,
    pub category_ids: Vec<Uuid>,
}

/// Input for [`LinkService::update`].
///
/// `category_ids` is the complete desired membership set.
#[derive(Debug, Clone, Default)]
pub struct UpdateLink {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_ids: Vec<Uuid>,
}

/// A link together with the ids of the categories it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkDetails {
    pub link: Link,
    pub category_ids: Vec<Uuid>,
}

/// Service owning the link ↔ category association rules.
///
/// Handles URL normalization, deduplication by URL, short code generation and
/// membership reconciliation.
pub struct LinkService<D: Database> {
    db: D,
    codes: Arc<dyn ShortCodeGenerator>,
}

impl<D: Database> LinkService<D> {
    /// Creates a new link service.
    pub fn new(db: D, codes: Arc<dyn ShortCodeGenerator>) -> Self {
        Self { db, codes }
    }

    /// Creates a link, or merges categories into the link that already has
    /// this URL.
    ///
    /// # Deduplication
    ///
    /// The URL is normalized first and the normalized string is the lookup
    /// key. If a link exists, only the requested categories it is missing are
    /// added; existing memberships are never removed here.
    ///
    /// # Concurrency
    ///
    /// Two creates for the same URL may both miss the lookup. The URL unique
    /// constraint lets one insert win; the other rolls back and takes the
    /// merge path. If the winning row is gone by the time the loser looks for
    /// it, the loser starts over once.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is invalid or a requested
    /// category does not exist. In the latter case nothing is written.
    ///
    /// Returns [`AppError::Conflict`] if the generated short code collides
    /// with another link's code.
    pub async fn create(&self, input: CreateLink) -> Result<LinkDetails, AppError> {
        let url = normalize_url(&input.url).map_err(|e| {
            AppError::bad_request("url must be a valid URL", json!({ "reason": e.to_string() }))
        })?;
        let requested = unique_ids(input.category_ids);

        let mut attempt = 1;
        loop {
            let existing = self.db.connection().await?.find_link_by_url(&url).await?;
            if let Some(link) = existing {
                tracing::debug!(link_id = %link.id, "URL already stored, merging categories");
                return self.merge_categories(link, requested).await;
            }

            let new_link = NewLink {
                short_code: self.codes.generate(&url),
                url: url.clone(),
                title: input.title.clone(),
                description: input.description.clone(),
            };

            let e = match self.insert_with_categories(new_link, requested.clone()).await {
                Ok(details) => {
                    tracing::info!(
                        link_id = %details.link.id,
                        short_code = %details.link.short_code,
                        categories = details.category_ids.len(),
                        "Link created"
                    );
                    return Ok(details);
                }
                Err(e)
                    if e.is_conflict_on(LINK_URL_CONSTRAINT)
                        || e.is_conflict_on(LINK_SHORT_CODE_CONSTRAINT) =>
                {
                    e
                }
                Err(e) => return Err(e),
            };

            // Same URL means same code, so a lost race can surface on either key.
            let winner = self.db.connection().await?.find_link_by_url(&url).await?;
            if let Some(link) = winner {
                tracing::info!(link_id = %link.id, "Concurrent create for the same URL, merging categories");
                return self.merge_categories(link, requested).await;
            }

            // The conflicting row is gone: its transaction rolled back or it was deleted.
            if attempt < CREATE_ATTEMPTS {
                tracing::debug!(attempt, "Conflicting link vanished, retrying create");
                attempt += 1;
                continue;
            }

            if e.is_conflict_on(LINK_SHORT_CODE_CONSTRAINT) {
                return Err(AppError::conflict(
                    "Short code collision, link could not be created",
                    json!({ "url": url }),
                ));
            }
            return Err(e);
        }
    }

    /// Inserts a new link and its memberships as one unit of work.
    async fn insert_with_categories(
        &self,
        new_link: NewLink,
        category_ids: Vec<Uuid>,
    ) -> Result<LinkDetails, AppError> {
        run_in_transaction(&self.db, move |tx| {
            Box::pin(async move {
                let link = tx.insert_link(new_link).await?;
                if !category_ids.is_empty() {
                    tx.add_link_categories(link.id, &category_ids).await?;
                }
                Ok(LinkDetails { link, category_ids })
            })
        })
        .await
    }

    /// Adds the requested memberships an existing link is missing.
    ///
    /// Pairs that already exist, including ones written by a concurrent
    /// merge, are skipped.
    async fn merge_categories(
        &self,
        link: Link,
        requested: Vec<Uuid>,
    ) -> Result<LinkDetails, AppError> {
        run_in_transaction(&self.db, move |tx| {
            Box::pin(async move {
                if !requested.is_empty() {
                    let added = tx.merge_link_categories(link.id, &requested).await?;
                    if added > 0 {
                        tracing::info!(link_id = %link.id, added, "Categories merged");
                    }
                }

                let category_ids = tx.category_ids_for_link(link.id).await?;
                Ok(LinkDetails { link, category_ids })
            })
        })
        .await
    }

    /// Updates title/description and replaces the category set.
    ///
    /// Runs as one unit of work: memberships in `current − requested` are
    /// removed and `requested − current` are added.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist; nothing is
    /// written in that case.
    /// Returns [`AppError::Validation`] if a requested category does not exist.
    pub async fn update(&self, id: Uuid, input: UpdateLink) -> Result<LinkDetails, AppError> {
        let requested = unique_ids(input.category_ids);
        let patch = LinkPatch {
            title: input.title,
            description: input.description,
        };

        run_in_transaction(&self.db, move |tx| {
            Box::pin(async move {
                let link = tx.update_link(id, patch).await?.ok_or_else(|| {
                    AppError::not_found("Link not found", json!({ "link_id": id }))
                })?;

                let current = tx.category_ids_for_link(id).await?;
                let to_add = difference(&requested, &current);
                let to_remove = difference(&current, &requested);

                if !to_remove.is_empty() {
                    tx.remove_link_categories(id, &to_remove).await?;
                }
                if !to_add.is_empty() {
                    tx.add_link_categories(id, &to_add).await?;
                }

                tracing::info!(
                    link_id = %id,
                    added = to_add.len(),
                    removed = to_remove.len(),
                    "Link updated"
                );

                Ok(LinkDetails {
                    link,
                    category_ids: requested,
                })
            })
        })
        .await
    }

    /// Deletes a link; its memberships go with it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.db.connection().await?.delete_link(id).await?;
        if !deleted {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": id }),
            ));
        }

        tracing::info!(link_id = %id, "Link deleted");
        Ok(())
    }

    /// Retrieves a link and its category ids.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn get(&self, id: Uuid) -> Result<LinkDetails, AppError> {
        let mut conn = self.db.connection().await?;
        let link = conn
            .find_link_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "link_id": id })))?;
        let category_ids = conn.category_ids_for_link(id).await?;

        Ok(LinkDetails { link, category_ids })
    }

    /// Resolves a short code to its link for redirection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        self.db
            .connection()
            .await?
            .find_link_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Lists links newest first.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError> {
        self.db.connection().await?.list_links(limit, offset).await
    }

    /// Lists links without any category.
    pub async fn list_uncategorized(&self) -> Result<Vec<Link>, AppError> {
        self.db.connection().await?.list_uncategorized_links().await
    }

    /// Lists the categories a link belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn categories(&self, id: Uuid) -> Result<Vec<Category>, AppError> {
        let mut conn = self.db.connection().await?;
        if conn.find_link_by_id(id).await?.is_none() {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": id }),
            ));
        }

        conn.categories_for_link(id).await
    }
}

/// Removes duplicates, keeping first occurrences in order.
fn unique_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

/// Ids in `left` that are not in `right`.
fn difference(left: &[Uuid], right: &[Uuid]) -> Vec<Uuid> {
    left.iter()
        .filter(|id| !right.contains(id))
        .copied()
        .collect()
}
