//! # API Error Types
//!
//! Unified error handling for the GraphQL API layer.

use async_graphql::{Error as GraphQLError, ErrorExtensions};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fleet_domain::DomainError;
use thiserror::Error;

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("Network error. Please try again.")]
    TransientFault,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::TransientFault => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for GraphQL extensions
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::TransientFault => "TRANSIENT_FAULT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            DomainError::Validation(_) | DomainError::CommandRejected { .. } => {
                Self::Validation(err.to_string())
            }
            DomainError::InvalidState { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> GraphQLError {
        GraphQLError::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.error_code());
            e.set("status", self.status_code().as_u16());

            if let Self::NotFound { entity_type, id } = self {
                e.set("entity_type", entity_type.as_str());
                e.set("entity_id", id.as_str());
            }
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": self.error_code(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
