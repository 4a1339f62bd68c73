//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::application::services::{CreateLink, LinkDetails, UpdateLink};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::utils::ids::parse_id;
use crate::utils::url_normalizer::normalize_url;

/// Request body for `POST /api/v1/link`.
///
/// ```json
/// {
///   "url": "example.com",
///   "title": "Example",
///   "description": "An example website",
///   "categoryIds": ["9b2e…"]
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[validate(custom(function = "validate_link_url"))]
    pub url: String,

    #[validate(length(min = 4, message = "title must be at least 4 characters"))]
    pub title: String,

    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: String,

    #[serde(default)]
    pub category_ids: Vec<String>,
}

impl TryFrom<CreateLinkRequest> for CreateLink {
    type Error = AppError;

    fn try_from(req: CreateLinkRequest) -> Result<Self, AppError> {
        Ok(CreateLink {
            category_ids: parse_category_ids(&req.category_ids)?,
            url: req.url,
            title: req.title,
            description: req.description,
        })
    }
}

/// Request body for `PUT /api/v1/link/{id}`.
///
/// `categoryIds` is the full desired set. Absent means empty, which removes
/// every membership.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkRequest {
    #[validate(length(min = 4, message = "title must be at least 4 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub category_ids: Vec<String>,
}

impl TryFrom<UpdateLinkRequest> for UpdateLink {
    type Error = AppError;

    fn try_from(req: UpdateLinkRequest) -> Result<Self, AppError> {
        Ok(UpdateLink {
            category_ids: parse_category_ids(&req.category_ids)?,
            title: req.title,
            description: req.description,
        })
    }
}

/// JSON representation of a link.
///
/// `categoryIds` is present on single-link responses and omitted in lists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub description: String,
    pub short_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<Uuid>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            url: link.url,
            title: link.title,
            description: link.description,
            short_code: link.short_code,
            category_ids: None,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

impl From<LinkDetails> for LinkResponse {
    fn from(details: LinkDetails) -> Self {
        Self {
            category_ids: Some(details.category_ids),
            ..Self::from(details.link)
        }
    }
}

fn validate_link_url(url: &str) -> Result<(), ValidationError> {
    normalize_url(url).map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("url");
        err.message = Some("url must be a valid URL".into());
        err
    })
}

fn parse_category_ids(raw: &[String]) -> Result<Vec<Uuid>, AppError> {
    raw.iter().map(|id| parse_id(id, "categoryIds")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_request(body: serde_json::Value) -> CreateLinkRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_create_request_valid() {
        let req = create_request(json!({
            "url": "example.com",
            "title": "Example",
            "description": "An example website"
        }));

        assert!(req.validate().is_ok());
        assert!(req.category_ids.is_empty());
    }

    #[test]
    fn test_create_request_short_title() {
        let req = create_request(json!({
            "url": "https://example.com",
            "title": "Ex",
            "description": "An example website"
        }));

        let err = AppError::from(req.validate().unwrap_err());
        assert_eq!(err.public_message(), "title must be at least 4 characters");
    }

    #[test]
    fn test_create_request_invalid_url() {
        let req = create_request(json!({
            "url": "ftp://example.com",
            "title": "Example",
            "description": "An example website"
        }));

        let err = AppError::from(req.validate().unwrap_err());
        assert_eq!(err.public_message(), "url must be a valid URL");
    }

    #[test]
    fn test_create_request_invalid_category_id() {
        let req = create_request(json!({
            "url": "https://example.com",
            "title": "Example",
            "description": "An example website",
            "categoryIds": ["not-a-uuid"]
        }));

        let err = CreateLink::try_from(req).unwrap_err();
        assert_eq!(err.public_message(), "categoryIds must be a valid ID");
    }

    #[test]
    fn test_update_request_optional_fields() {
        let req: UpdateLinkRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.validate().is_ok());

        let update = UpdateLink::try_from(req).unwrap();
        assert!(update.title.is_none());
        assert!(update.category_ids.is_empty());

        let req: UpdateLinkRequest =
            serde_json::from_value(json!({ "description": "short" })).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_link_response_camel_case() {
        let now = Utc::now();
        let link = Link::new(
            Uuid::new_v4(),
            "https://example.com".to_string(),
            "Example".to_string(),
            "An example website".to_string(),
            "abcdEFGH".to_string(),
            now,
            now,
        );

        let list_item = serde_json::to_value(LinkResponse::from(link.clone())).unwrap();
        assert_eq!(list_item["shortCode"], "abcdEFGH");
        assert!(list_item.get("categoryIds").is_none());

        let detailed = serde_json::to_value(LinkResponse::from(LinkDetails {
            link,
            category_ids: vec![],
        }))
        .unwrap();
        assert_eq!(detailed["categoryIds"], json!([]));
    }
}
