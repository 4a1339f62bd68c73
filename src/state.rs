//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{CategoryService, LinkService};
use crate::domain::unit_of_work::Database;
use crate::utils::short_code::{Sha256CodeGenerator, ShortCodeGenerator};

/// Services and the database handle shared by all requests.
///
/// Generic over the [`Database`] so the same router can be served from
/// PostgreSQL in production and from [`crate::infrastructure::memory::MemoryDatabase`]
/// in tests.
pub struct AppState<D: Database> {
    pub db: D,
    pub link_service: Arc<LinkService<D>>,
    pub category_service: Arc<CategoryService<D>>,
}

impl<D: Database> AppState<D> {
    /// Builds the state with the default SHA-256 short code generator.
    pub fn new(db: D) -> Self {
        Self::with_code_generator(db, Arc::new(Sha256CodeGenerator))
    }

    pub fn with_code_generator(db: D, codes: Arc<dyn ShortCodeGenerator>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(db.clone(), codes)),
            category_service: Arc::new(CategoryService::new(db.clone())),
            db,
        }
    }
}

impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            link_service: self.link_service.clone(),
            category_service: self.category_service.clone(),
        }
    }
}
