//! API route configuration.

use crate::api::handlers::{
    api_root_handler, category_links_handler, create_category_handler, create_link_handler,
    delete_category_handler, delete_link_handler, get_category_handler, get_link_handler,
    link_categories_handler, list_categories_handler, list_links_handler, redirect_handler,
    root_categories_handler, subcategories_handler, uncategorized_links_handler,
    update_category_handler, update_link_handler,
};
use crate::domain::unit_of_work::Database;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All `/api/v1` routes.
///
/// # Endpoints
///
/// - `GET    /`                            - API greeting
/// - `POST   /link`                        - Create a link (or merge categories)
/// - `GET    /link`                        - List links (`limit`, `offset`)
/// - `GET    /link/uncategorized`          - Links without categories
/// - `GET    /link/r/{shortUrl}`           - 301 redirect to the stored URL
/// - `GET    /link/{id}`                   - Single link with category ids
/// - `PUT    /link/{id}`                   - Update a link and replace its categories
/// - `DELETE /link/{id}`                   - Delete a link
/// - `GET    /link/{id}/categories`        - Categories of a link
/// - `POST   /category`                    - Create a category
/// - `GET    /category`                    - List categories
/// - `GET    /category/roots`              - Categories without parent
/// - `GET    /category/{id}`               - Single category
/// - `PUT    /category/{id}`               - Update a category
/// - `DELETE /category/{id}`               - Delete a category
/// - `GET    /category/{id}/subcategories` - Direct children
/// - `GET    /category/{id}/links`         - Links in a category
pub fn api_routes<D: Database>() -> Router<AppState<D>> {
    Router::new()
        .route("/", get(api_root_handler))
        .route(
            "/link",
            post(create_link_handler::<D>).get(list_links_handler::<D>),
        )
        .route("/link/uncategorized", get(uncategorized_links_handler::<D>))
        .route("/link/r/{short_url}", get(redirect_handler::<D>))
        .route(
            "/link/{id}",
            get(get_link_handler::<D>)
                .put(update_link_handler::<D>)
                .delete(delete_link_handler::<D>),
        )
        .route("/link/{id}/categories", get(link_categories_handler::<D>))
        .route(
            "/category",
            post(create_category_handler::<D>).get(list_categories_handler::<D>),
        )
        .route("/category/roots", get(root_categories_handler::<D>))
        .route(
            "/category/{id}",
            get(get_category_handler::<D>)
                .put(update_category_handler::<D>)
                .delete(delete_category_handler::<D>),
        )
        .route(
            "/category/{id}/subcategories",
            get(subcategories_handler::<D>),
        )
        .route("/category/{id}/links", get(category_links_handler::<D>))
}
