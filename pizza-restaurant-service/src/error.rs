use std::fmt;

use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::models::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Restaurant,
    Pizza,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Restaurant => write!(f, "Restaurant"),
            Entity::Pizza => write!(f, "Pizza"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(Entity),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("failed to connect to database: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("failed to run migrations: {0}")]
    Migration(String),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors surfaced to HTTP clients.
///
/// Lookups of a restaurant by path answer with a singular `error` string,
/// while restaurant-pizza creation answers with an `errors` array. Existing
/// clients depend on both shapes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(Entity),
    #[error("validation errors")]
    Validation,
    #[error("{0} not found")]
    MissingReference(Entity),
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Maps a failure of restaurant-pizza creation, where unknown references
    /// are reported in the `errors` array.
    pub fn from_create(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(entity) => ApiError::MissingReference(entity),
            other => other.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => {
                warn!(error = %e, "rejected invalid input");
                ApiError::Validation
            }
            ServiceError::NotFound(entity) => ApiError::NotFound(entity),
            other => {
                error!(error = %other, "request failed");
                ApiError::InternalError(other.to_string())
            }
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{entity} not found") }),
            ),
            ApiError::Validation => (
                StatusCode::BAD_REQUEST,
                json!({ "errors": ["validation errors"] }),
            ),
            ApiError::MissingReference(entity) => (
                StatusCode::NOT_FOUND,
                json!({ "errors": [format!("{entity} not found")] }),
            ),
            ApiError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorsResponse {
    /// Error messages
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_uses_singular_error() {
        let (status, body) = body_of(ApiError::NotFound(Entity::Restaurant)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Restaurant not found"}));
    }

    #[tokio::test]
    async fn test_create_errors_use_array() {
        let (status, body) =
            body_of(ApiError::from_create(ServiceError::NotFound(Entity::Pizza))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"errors": ["Pizza not found"]}));

        let (status, body) = body_of(ApiError::from_create(ServiceError::Validation(
            ValidationError::PriceOutOfRange(0),
        )))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"errors": ["validation errors"]}));
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) =
            body_of(ServiceError::Migration("boom".to_string()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            ServiceError::NotFound(Entity::Pizza).to_string(),
            "Pizza not found"
        );
        assert_eq!(
            ServiceError::NotFound(Entity::Restaurant).to_string(),
            "Restaurant not found"
        );
    }
}
