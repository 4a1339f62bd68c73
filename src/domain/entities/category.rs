//! Category entity used to group links.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A named, optionally nested tag that links can be grouped under.
///
/// `parent_id` points at another category. Only one level of parent/child is
/// interpreted by the service; chains and cycles are not inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new Category instance.
    pub fn new(
        id: Uuid,
        name: String,
        description: Option<String>,
        parent_id: Option<Uuid>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            parent_id,
            created_at,
            updated_at,
        }
    }

    /// Returns true if the category has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Input data for creating a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
}

/// Partial update for an existing category.
///
/// `None` leaves a field unchanged. For the nullable fields,
/// `Some(None)` clears the value and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub parent_id: Option<Option<Uuid>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_is_root() {
        let now = Utc::now();
        let root = Category::new(Uuid::new_v4(), "Rust".to_string(), None, None, now, now);
        let child = Category::new(
            Uuid::new_v4(),
            "Async Rust".to_string(),
            Some("Futures, executors and friends".to_string()),
            Some(root.id),
            now,
            now,
        );

        assert!(root.is_root());
        assert!(!child.is_root());
        assert_eq!(child.parent_id, Some(root.id));
    }
}
