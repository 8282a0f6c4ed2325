//! Application-level error type returned by handlers.
//!
//! Every variant serialises to the catalog's error body
//! (`{requestId, errorCode, errorMessage}`) with an Atlas error code and the
//! matching HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use datacatalog_api::error::codes;
use datacatalog_api::ErrorResponse;

use crate::storage::StorageError;

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    /// A required query parameter is absent. Carries the parameter name.
    MissingParameter(String),
    TypeNotFound(String),
    TypeGuidNotFound(String),
    EntityNotFound(String),
    RelationshipNotFound(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, codes::BAD_REQUEST, msg),
            AppError::MissingParameter(name) => (
                StatusCode::BAD_REQUEST,
                codes::MISSING_MANDATORY_PARAMETER,
                format!("Mandatory parameter {name} is missing"),
            ),
            AppError::TypeNotFound(name) => (
                StatusCode::NOT_FOUND,
                codes::TYPE_NAME_NOT_FOUND,
                format!("Given typename {name} was invalid"),
            ),
            AppError::TypeGuidNotFound(guid) => (
                StatusCode::NOT_FOUND,
                codes::TYPE_GUID_NOT_FOUND,
                format!("Given type guid {guid} was invalid"),
            ),
            AppError::EntityNotFound(guid) => (
                StatusCode::NOT_FOUND,
                codes::INSTANCE_GUID_NOT_FOUND,
                format!("Given instance guid {guid} is invalid/not found"),
            ),
            AppError::RelationshipNotFound(guid) => (
                StatusCode::NOT_FOUND,
                codes::RELATIONSHIP_GUID_NOT_FOUND,
                format!("Given relationship guid {guid} is invalid/not found"),
            ),
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, codes::RELATIONSHIP_ALREADY_EXISTS, msg)
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, codes::INTERNAL_ERROR, msg)
            }
        };
        if status.is_server_error() {
            tracing::error!(code, "{message}");
        }
        let mut body = ErrorResponse::new(code, message);
        body.request_id = Some(uuid::Uuid::now_v7().to_string());
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(what) => AppError::TypeNotFound(what),
            StorageError::Conflict(msg) => AppError::Conflict(msg),
            StorageError::Invalid(msg) => AppError::BadRequest(msg),
            StorageError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
