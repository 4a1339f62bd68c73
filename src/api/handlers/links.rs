//! Handlers for link endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::category::CategoryResponse;
use crate::api::dto::link::{CreateLinkRequest, LinkResponse, UpdateLinkRequest};
use crate::api::dto::pagination::PaginationParams;
use crate::domain::unit_of_work::Database;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::ids::parse_id;

/// Creates a link, or merges categories into the existing link for this URL.
///
/// # Endpoint
///
/// `POST /api/v1/link`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "example.com",
///   "title": "Example",
///   "description": "An example website",
///   "categoryIds": ["0b6c5a8e-…"]
/// }
/// ```
///
/// A URL without scheme is stored with `https://`. Submitting a known URL
/// adds the missing categories and still answers 201.
///
/// # Errors
///
/// - 400 on validation failure or unknown category id
/// - 409 on short code collision
pub async fn create_link_handler<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let details = state.link_service.create(payload.try_into()?).await?;

    Ok((StatusCode::CREATED, Json(details.into())))
}

/// Lists links newest first.
///
/// # Endpoint
///
/// `GET /api/v1/link?limit=20&offset=0`
///
/// # Errors
///
/// Returns 400 if `limit` is outside 1..=100 or `offset` is negative.
pub async fn list_links_handler<D: Database>(
    State(state): State<AppState<D>>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let Query(params) = params?;
    let (limit, offset) = params
        .validate_and_get_limit_offset()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let links = state.link_service.list(limit, offset).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// `GET /api/v1/link/uncategorized`
pub async fn uncategorized_links_handler<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_uncategorized().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns a link with its category ids.
///
/// # Endpoint
///
/// `GET /api/v1/link/{id}`
pub async fn get_link_handler<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_id(&id, "id")?;
    let details = state.link_service.get(id).await?;

    Ok(Json(details.into()))
}

/// `GET /api/v1/link/{id}/categories`
pub async fn link_categories_handler<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    let categories = state.link_service.categories(id).await?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Updates a link and replaces its category set.
///
/// # Endpoint
///
/// `PUT /api/v1/link/{id}`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "New title",          // optional
///   "description": "…",            // optional
///   "categoryIds": ["…"]           // full set; absent or [] removes all
/// }
/// ```
///
/// # Errors
///
/// - 400 on validation failure or unknown category id
/// - 404 if the link does not exist
pub async fn update_link_handler<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateLinkRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_id(&id, "id")?;
    let Json(payload) = payload?;
    payload.validate()?;

    let details = state.link_service.update(id, payload.try_into()?).await?;

    Ok(Json(details.into()))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/v1/link/{id}`
///
/// # Errors
///
/// Returns 404 if the link does not exist.
pub async fn delete_link_handler<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(&id, "id")?;
    state.link_service.delete(id).await?;

    Ok(Json(json!({ "message": "Link deleted" })))
}
