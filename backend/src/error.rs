//! Error handling for the Weather Alert System
//!
//! Every failure maps to one JSON body of the form
//! `{"error": {"code", "message", "field"?}}`.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Provider credentials are missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller input outside policy
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    /// Transport failure, timeout or non-success status from the provider
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Provider payload did not have the expected shape
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status the adapter reports for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_)
            | AppError::Upstream(_)
            | AppError::MalformedResponse(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        match fields
            .first()
            .and_then(|(field, errs)| errs.first().map(|err| (field.to_string(), err)))
        {
            Some((field, err)) => {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field));
                AppError::Validation { field, message }
            }
            None => AppError::validation("input", errors.to_string()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation("query", rejection.body_text())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_detail = match &self {
            AppError::Configuration(msg) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message: msg.clone(),
                field: None,
            },
            AppError::Validation { field, message } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: message.clone(),
                field: Some(field.clone()),
            },
            AppError::Upstream(msg) => ErrorDetail {
                code: "UPSTREAM_ERROR".to_string(),
                message: format!("Failed to fetch weather data: {}", msg),
                field: None,
            },
            AppError::MalformedResponse(msg) => ErrorDetail {
                code: "MALFORMED_RESPONSE".to_string(),
                message: format!("Unexpected weather provider response: {}", msg),
                field: None,
            },
            AppError::NotFound(resource) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message: format!("{} not found", resource),
                field: None,
            },
            AppError::Internal(_) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: "An unexpected error occurred".to_string(),
                field: None,
            },
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected request: {:?}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
