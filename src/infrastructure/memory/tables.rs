use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{Category, CategoryPatch, Link, LinkPatch, NewCategory, NewLink};
use crate::domain::repositories::{
    CATEGORY_NAME_CONSTRAINT, LINK_SHORT_CODE_CONSTRAINT, LINK_URL_CONSTRAINT,
};
use crate::error::AppError;

const MEMBERSHIP_PKEY: &str = "link_categories_pkey";
const MEMBERSHIP_LINK_FKEY: &str = "link_categories_link_id_fkey";
const MEMBERSHIP_CATEGORY_FKEY: &str = "link_categories_category_id_fkey";
const CATEGORY_PARENT_FKEY: &str = "categories_parent_id_fkey";

fn unique_violation(constraint: &str) -> AppError {
    AppError::conflict(
        "Unique constraint violation",
        json!({ "constraint": constraint }),
    )
}

fn foreign_key_violation(constraint: &str) -> AppError {
    AppError::bad_request(
        "Referenced record does not exist",
        json!({ "constraint": constraint }),
    )
}

/// Rows in insertion order.
#[derive(Clone, Default)]
pub(super) struct Tables {
    pub(super) links: Vec<Link>,
    pub(super) categories: Vec<Category>,
    pub(super) memberships: Vec<(Uuid, Uuid)>,
}

impl Tables {
    pub(super) fn link(&self, id: Uuid) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub(super) fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Matching links, newest first; ties keep the later insert first.
    pub(super) fn links_newest_first(&self, keep: impl Fn(&Link) -> bool) -> Vec<Link> {
        let mut links: Vec<Link> = self.links.iter().rev().filter(|l| keep(l)).cloned().collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        links
    }

    pub(super) fn categories_by_name(&self, keep: impl Fn(&Category) -> bool) -> Vec<Category> {
        let mut categories: Vec<Category> =
            self.categories.iter().filter(|c| keep(c)).cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    pub(super) fn insert_link(&mut self, new_link: NewLink) -> Result<Link, AppError> {
        if self.links.iter().any(|l| l.url == new_link.url) {
            return Err(unique_violation(LINK_URL_CONSTRAINT));
        }
        if self.links.iter().any(|l| l.short_code == new_link.short_code) {
            return Err(unique_violation(LINK_SHORT_CODE_CONSTRAINT));
        }

        let now = Utc::now();
        let link = Link::new(
            Uuid::new_v4(),
            new_link.url,
            new_link.title,
            new_link.description,
            new_link.short_code,
            now,
            now,
        );
        self.links.push(link.clone());
        Ok(link)
    }

    pub(super) fn update_link(&mut self, id: Uuid, patch: LinkPatch) -> Option<Link> {
        let link = self.links.iter_mut().find(|l| l.id == id)?;

        if let Some(title) = patch.title {
            link.title = title;
        }
        if let Some(description) = patch.description {
            link.description = description;
        }
        link.updated_at = Utc::now();

        Some(link.clone())
    }

    pub(super) fn delete_link(&mut self, id: Uuid) -> bool {
        let before = self.links.len();
        self.links.retain(|l| l.id != id);
        if self.links.len() == before {
            return false;
        }

        self.memberships.retain(|(link_id, _)| *link_id != id);
        true
    }

    pub(super) fn insert_category(&mut self, new_category: NewCategory) -> Result<Category, AppError> {
        if self.categories.iter().any(|c| c.name == new_category.name) {
            return Err(unique_violation(CATEGORY_NAME_CONSTRAINT));
        }
        if let Some(parent_id) = new_category.parent_id
            && self.category(parent_id).is_none()
        {
            return Err(foreign_key_violation(CATEGORY_PARENT_FKEY));
        }

        let now = Utc::now();
        let category = Category::new(
            Uuid::new_v4(),
            new_category.name,
            new_category.description,
            new_category.parent_id,
            now,
            now,
        );
        self.categories.push(category.clone());
        Ok(category)
    }

    pub(super) fn update_category(
        &mut self,
        id: Uuid,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, AppError> {
        if self.category(id).is_none() {
            return Ok(None);
        }

        if let Some(name) = &patch.name
            && self.categories.iter().any(|c| c.id != id && &c.name == name)
        {
            return Err(unique_violation(CATEGORY_NAME_CONSTRAINT));
        }
        if let Some(Some(parent_id)) = patch.parent_id
            && self.category(parent_id).is_none()
        {
            return Err(foreign_key_violation(CATEGORY_PARENT_FKEY));
        }

        let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(description) = patch.description {
            category.description = description;
        }
        if let Some(parent_id) = patch.parent_id {
            category.parent_id = parent_id;
        }
        category.updated_at = Utc::now();

        Ok(Some(category.clone()))
    }

    pub(super) fn delete_category(&mut self, id: Uuid) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return false;
        }

        self.memberships.retain(|(_, category_id)| *category_id != id);
        for child in self.categories.iter_mut().filter(|c| c.parent_id == Some(id)) {
            child.parent_id = None;
        }
        true
    }

    /// Inserts every pair or none of them.
    pub(super) fn add_memberships(
        &mut self,
        link_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<(), AppError> {
        if category_ids.is_empty() {
            return Ok(());
        }
        if self.link(link_id).is_none() {
            return Err(foreign_key_violation(MEMBERSHIP_LINK_FKEY));
        }

        let mut pending: Vec<(Uuid, Uuid)> = Vec::with_capacity(category_ids.len());
        for &category_id in category_ids {
            if self.category(category_id).is_none() {
                return Err(foreign_key_violation(MEMBERSHIP_CATEGORY_FKEY));
            }
            let pair = (link_id, category_id);
            if self.memberships.contains(&pair) || pending.contains(&pair) {
                return Err(unique_violation(MEMBERSHIP_PKEY));
            }
            pending.push(pair);
        }

        self.memberships.extend(pending);
        Ok(())
    }

    /// Like [`Tables::add_memberships`] but existing pairs are skipped.
    pub(super) fn merge_memberships(
        &mut self,
        link_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<u64, AppError> {
        if category_ids.is_empty() {
            return Ok(0);
        }
        if self.link(link_id).is_none() {
            return Err(foreign_key_violation(MEMBERSHIP_LINK_FKEY));
        }
        if category_ids.iter().any(|&id| self.category(id).is_none()) {
            return Err(foreign_key_violation(MEMBERSHIP_CATEGORY_FKEY));
        }

        let before = self.memberships.len();
        for &category_id in category_ids {
            let pair = (link_id, category_id);
            if !self.memberships.contains(&pair) {
                self.memberships.push(pair);
            }
        }
        Ok((self.memberships.len() - before) as u64)
    }

    pub(super) fn remove_memberships(&mut self, link_id: Uuid, category_ids: &[Uuid]) -> u64 {
        let before = self.memberships.len();
        self.memberships
            .retain(|(l, c)| !(*l == link_id && category_ids.contains(c)));
        (before - self.memberships.len()) as u64
    }
}
