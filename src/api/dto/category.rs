//! DTOs for category endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Category, CategoryPatch, NewCategory};
use crate::error::AppError;
use crate::utils::ids::parse_id;

const MIN_DESCRIPTION_LEN: usize = 10;

/// Request body for `POST /api/v1/category`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 4, message = "name must be at least 4 characters"))]
    pub name: String,

    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: Option<String>,

    pub parent_id: Option<String>,
}

impl TryFrom<CreateCategoryRequest> for NewCategory {
    type Error = AppError;

    fn try_from(req: CreateCategoryRequest) -> Result<Self, AppError> {
        let parent_id = req
            .parent_id
            .as_deref()
            .map(|id| parse_id(id, "parentId"))
            .transpose()?;

        Ok(NewCategory {
            name: req.name,
            description: req.description,
            parent_id,
        })
    }
}

/// Request body for `PUT /api/v1/category/{id}`.
///
/// # `description` / `parentId` semantics
///
/// - **Absent** → leave existing value unchanged
/// - **`null`** → clear the value
/// - **Value** → set it
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 4, message = "name must be at least 4 characters"))]
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub parent_id: Option<Option<String>>,
}

impl TryFrom<UpdateCategoryRequest> for CategoryPatch {
    type Error = AppError;

    fn try_from(req: UpdateCategoryRequest) -> Result<Self, AppError> {
        if let Some(Some(description)) = &req.description
            && description.chars().count() < MIN_DESCRIPTION_LEN
        {
            return Err(AppError::bad_request(
                "description must be at least 10 characters",
                json!({ "field": "description" }),
            ));
        }

        let parent_id = match req.parent_id {
            Some(Some(id)) => Some(Some(parse_id(&id, "parentId")?)),
            Some(None) => Some(None),
            None => None,
        };

        Ok(CategoryPatch {
            name: req.name,
            description: req.description,
            parent_id,
        })
    }
}

/// JSON representation of a category.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            parent_id: c.parent_id,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
