//! Link entity representing a stored bookmark.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored URL with metadata and its redirect short code.
///
/// `url` is unique across all links and always carries a scheme.
/// `short_code` is unique and used for redirect lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub description: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        url: String,
        title: String,
        description: String,
        short_code: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url,
            title,
            description,
            short_code,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a new link.
///
/// `url` must already be normalized; `short_code` is derived from it.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub url: String,
    pub title: String,
    pub description: String,
    pub short_code: String,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged. The URL and short code are immutable.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl LinkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}
