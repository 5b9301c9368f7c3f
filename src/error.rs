// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use crate::api::envelope;
use crate::auth::AuthError;
use crate::database::store_repository::RepositoryError;
use crate::services::store_service::ServiceError;

/// Transport-level error with the stable code/status/message triple every
/// client-facing failure is reduced to.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    InvalidJson(String),
    InvalidRequest(String),
    InvalidId(String),
    ValidationError { message: String, details: Option<Value> },

    // 401 Unauthorized
    Unauthorized(String),

    // 404 / 405, produced by the routing layer only
    NotFound(String),
    MethodNotAllowed(String),

    // 500 Internal Server Error
    InternalError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_)
            | ApiError::InvalidRequest(_)
            | ApiError::InvalidId(_)
            | ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
            ApiError::InvalidId(_) => "INVALID_ID",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidJson(msg)
            | ApiError::InvalidRequest(msg)
            | ApiError::InvalidId(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::MethodNotAllowed(msg)
            | ApiError::InternalError(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
        }
    }
}

impl ApiError {
    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest(message.into())
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        ApiError::InvalidId(message.into())
    }

    pub fn validation_error(message: impl Into<String>, details: Option<Value>) -> Self {
        ApiError::ValidationError { message: message.into(), details }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed(message.into())
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        ApiError::InternalError(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::unauthorized(err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(v) => {
                let details = v.technical.map(|t| serde_json::json!({ "technical": t }));
                ApiError::validation_error(v.message, details)
            }
            // Absent ids surface as a business-level validation failure, not a 404.
            ServiceError::NotFound(id) => {
                ApiError::validation_error(format!("Store with ID {} not found", id), None)
            }
            ServiceError::Repository(RepositoryError::Filter(f)) => {
                ApiError::validation_error(f.to_string(), None)
            }
            ServiceError::Repository(RepositoryError::NotFound(id)) => {
                ApiError::validation_error(format!("Store with ID {} not found", id), None)
            }
            ServiceError::Repository(e) => {
                // Raw storage errors stay in the logs; clients get a generic message.
                tracing::error!("repository failure: {:?}", e);
                ApiError::internal_error("An error occurred while processing your request")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let details = match &self {
            ApiError::ValidationError { details, .. } => details.clone(),
            _ => None,
        };
        let body = envelope::error_body(self.error_code(), self.message(), details);
        (self.status_code(), Json(body)).into_response()
    }
}
