//! Handlers for category endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::category::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::api::dto::link::LinkResponse;
use crate::domain::unit_of_work::Database;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::ids::parse_id;

/// Creates a category.
///
/// # Endpoint
///
/// `POST /api/v1/category`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Rust",
///   "description": "Systems programming",   // optional
///   "parentId": "…"                         // optional
/// }
/// ```
///
/// # Errors
///
/// - 400 on validation failure or unknown parent
/// - 409 if the name is taken
pub async fn create_category_handler<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let category = state.category_service.create(payload.try_into()?).await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// `GET /api/v1/category`
pub async fn list_categories_handler<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state.category_service.list_all().await?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// `GET /api/v1/category/roots`
pub async fn root_categories_handler<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state.category_service.list_roots().await?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// `GET /api/v1/category/{id}`
pub async fn get_category_handler<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, AppError> {
    let id = parse_id(&id, "id")?;
    let category = state.category_service.get(id).await?;

    Ok(Json(category.into()))
}

/// Lists the direct children of a category.
///
/// # Endpoint
///
/// `GET /api/v1/category/{id}/subcategories`
///
/// # Errors
///
/// Returns 404 if the parent does not exist.
pub async fn subcategories_handler<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    let categories = state.category_service.list_children(id).await?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Lists links in a category. An empty category answers `[]`.
///
/// # Endpoint
///
/// `GET /api/v1/category/{id}/links`
pub async fn category_links_handler<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    let links = state.category_service.links(id).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Partially updates a category.
///
/// # Endpoint
///
/// `PUT /api/v1/category/{id}`
///
/// `description` and `parentId` accept `null` to clear them.
///
/// # Errors
///
/// - 400 on validation failure, unknown parent or self-parenting
/// - 404 if the category does not exist
/// - 409 if the new name is taken
pub async fn update_category_handler<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryResponse>, AppError> {
    let id = parse_id(&id, "id")?;
    let Json(payload) = payload?;
    payload.validate()?;

    let category = state
        .category_service
        .update(id, payload.try_into()?)
        .await?;

    Ok(Json(category.into()))
}

/// Deletes a category. Its children become roots.
///
/// # Endpoint
///
/// `DELETE /api/v1/category/{id}`
pub async fn delete_category_handler<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(&id, "id")?;
    state.category_service.delete(id).await?;

    Ok(Json(json!({ "message": "Category deleted" })))
}
