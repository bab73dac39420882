//! Error handling for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Standard error response format: one message per reported problem
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub errors: Vec<String>,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more request fields failed validation.
    #[error("validation error: {}", .messages.join("; "))]
    Validation { messages: Vec<String> },

    /// A domain rule rejected the request.
    #[error("business rule violated: {message}")]
    Business { message: String },

    #[error("resource not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    /// Create a business rule error
    pub fn business(message: impl Into<String>) -> Self {
        Self::Business {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::Business { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();

        let messages = match self {
            AppError::Validation { messages } => messages,
            AppError::Business { message } => vec![message],
            AppError::NotFound => {
                tracing::debug!(error_id = %error_id, "resource not found");
                return status.into_response();
            }
            AppError::Internal(e) => {
                tracing::error!(error_id = %error_id, error = ?e, "internal error");
                // Hide internal error details outside of debug builds
                if cfg!(debug_assertions) {
                    vec![e.to_string()]
                } else {
                    vec!["An internal server error occurred".to_string()]
                }
            }
        };

        tracing::warn!(
            error_id = %error_id,
            status_code = %status.as_u16(),
            errors = ?messages,
            "request rejected"
        );

        (status, Json(ErrorBody { errors: messages })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_lists_every_message() {
        let error = AppError::validation(vec![
            "title must not be empty".to_string(),
            "isbn must not be empty".to_string(),
        ]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({"errors": ["title must not be empty", "isbn must not be empty"]})
        );
    }

    #[tokio::test]
    async fn test_business_error_is_single_message() {
        let response = AppError::business("Isbn já cadastrado.").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({"errors": ["Isbn já cadastrado."]}));
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let response = AppError::not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_internal_error_mapping() {
        let internal_error = anyhow::anyhow!("Database connection failed");
        let error = AppError::Internal(internal_error);
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
