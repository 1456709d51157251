use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use shared::EngineError;
use validator::ValidationErrors;

use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    Validation(String),
    InvalidConfiguration(String),
    Store(StoreError),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(what) => write!(f, "{}", what),
            Self::Validation(msg) => write!(f, "Validation failed: {}", msg),
            Self::InvalidConfiguration(msg) => write!(f, "Invalid wheel: {}", msg),
            Self::Store(e) => write!(f, "Storage error: {}", e),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidConfiguration(msg) => Self::InvalidConfiguration(msg),
            EngineError::AlreadySpinning => Self::Internal(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::InvalidConfiguration(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Storage details stay in the log.
        let message = match &self {
            Self::Store(e) => {
                tracing::error!("{}", e);
                "Error processing request".to_string()
            }
            Self::Internal(msg) => {
                tracing::error!("{}", msg);
                "Error processing request".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
