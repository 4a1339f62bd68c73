//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.
//! Handlers are generic over the [`crate::domain::unit_of_work::Database`]
//! backing the services.

pub mod categories;
pub mod health;
pub mod links;
pub mod redirect;
pub mod root;

pub use categories::{
    category_links_handler, create_category_handler, delete_category_handler,
    get_category_handler, list_categories_handler, root_categories_handler,
    subcategories_handler, update_category_handler,
};
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, get_link_handler, link_categories_handler,
    list_links_handler, uncategorized_links_handler, update_link_handler,
};
pub use redirect::redirect_handler;
pub use root::{api_root_handler, fallback_handler, root_handler};
