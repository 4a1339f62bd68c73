//! Business logic services for the application layer.

pub mod category_service;
pub mod link_service;

pub use category_service::CategoryService;
pub use link_service::{CreateLink, LinkDetails, LinkService, UpdateLink};
