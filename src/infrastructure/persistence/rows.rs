use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{Category, Link};

pub(super) const LINK_COLUMNS: &str =
    "id, url, title, description, short_code, created_at, updated_at";

pub(super) const CATEGORY_COLUMNS: &str = "id, name, description, parent_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
pub(super) struct LinkRow {
    id: Uuid,
    url: String,
    title: String,
    description: String,
    short_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.url,
            r.title,
            r.description,
            r.short_code,
            r.created_at,
            r.updated_at,
        )
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct CategoryRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    parent_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category::new(
            r.id,
            r.name,
            r.description,
            r.parent_id,
            r.created_at,
            r.updated_at,
        )
    }
}
