//! Error taxonomy shared by every calling convention.
//!
//! The SDK performs no recovery: transport failures and non-success statuses
//! reach the caller unchanged. The only errors raised locally are request
//! shaping errors, which are caller mistakes detected before any I/O.

use serde::{Deserialize, Serialize};

use crate::payload::Payload;

/// Errors returned by catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required path or query parameter was not supplied.
    #[error("{operation}: missing required parameter '{parameter}'")]
    MissingParameter {
        operation: &'static str,
        parameter: String,
    },

    /// A parameter was supplied but cannot be placed on the wire.
    #[error("{operation}: invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        operation: &'static str,
        parameter: String,
        reason: String,
    },

    /// A body-bearing operation was shaped without a body.
    #[error("{operation}: request body is required")]
    MissingBody { operation: &'static str },

    /// No operation has this wire name.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// The service answered with a non-success status.
    ///
    /// The payload is the response body exactly as received.
    #[error("{operation}: service returned status {status}")]
    Status {
        operation: &'static str,
        status: u16,
        payload: Payload,
    },

    /// The request never produced a response (connect, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A bearer token could not be obtained.
    #[error("credential error: {0}")]
    Credential(String),

    /// A payload helper failed to encode or decode JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap any transport-level error.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport(Box::new(err))
    }

    /// HTTP status, when the error came from a service response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for a 404 answer from the service.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The service's structured error body, when it sent one.
    pub fn service_error(&self) -> Option<ErrorResponse> {
        match self {
            Error::Status { payload, .. } => payload.json().ok(),
            _ => None,
        }
    }
}

/// The JSON body the catalog returns for failed requests.
///
/// ```json
/// { "requestId": "5a5d…", "errorCode": "ATLAS-404-00-005", "errorMessage": "Given instance guid … is invalid/not found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub error_code: String,
    pub error_message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            request_id: None,
            error_code: error_code.into(),
            error_message: error_message.into(),
        }
    }
}
