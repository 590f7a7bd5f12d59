//! Application error type and its HTTP mapping.
//!
//! Every handler returns `Result<_, AppError>`; the status code for each error
//! kind is decided in exactly one place, [`AppError::status_code`].

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::api::dto::envelope::ApiResponse;

/// Message returned to clients for any schema failure.
pub const VALIDATION_MESSAGE: &str = "Failed in type validation.";

/// Message returned to clients for any unexpected failure.
pub const INTERNAL_MESSAGE: &str = "Something went wrong.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or out-of-range input. `errors` is a machine-readable list.
    #[error("{message}")]
    Validation { message: String, errors: Value },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    /// Store failure or an unexpected code path. `details` is logged, never sent.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, errors: Value) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(details: Value) -> Self {
        Self::Internal {
            message: INTERNAL_MESSAGE.to_string(),
            details,
        }
    }

    /// The single mapping from error kind to transport status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation { message, errors } => {
                ApiResponse::<()>::error(message).with_errors(errors)
            }
            AppError::NotFound { message } | AppError::Conflict { message } => {
                ApiResponse::<()>::error(message)
            }
            AppError::Internal { message, details } => {
                tracing::error!(%details, "request failed");
                ApiResponse::<()>::error(message)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request(VALIDATION_MESSAGE, validation_details(&errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            VALIDATION_MESSAGE,
            json!([{
                "field": "body",
                "code": "invalid_json",
                "message": rejection.body_text(),
            }]),
        )
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(
            VALIDATION_MESSAGE,
            json!([{
                "field": "path",
                "code": "invalid_path",
                "message": rejection.body_text(),
            }]),
        )
    }
}

/// Flattens validator output into `[{ field, code, message, params }]`.
fn validation_details(errors: &ValidationErrors) -> Value {
    let mut items: Vec<Value> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                json!({
                    "field": field,
                    "code": e.code,
                    "message": e.message,
                    "params": e.params,
                })
            })
        })
        .collect();

    // HashMap iteration order is unspecified
    items.sort_by(|a, b| a["field"].as_str().cmp(&b["field"].as_str()));

    Value::Array(items)
}

pub fn map_redis_error(e: redis::RedisError) -> AppError {
    AppError::internal(json!({
        "source": "redis",
        "kind": format!("{:?}", e.kind()),
        "reason": e.to_string(),
    }))
}
