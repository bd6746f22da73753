//! Error responses of the library API

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::{NoContext, Timestamp, Uuid};

/// Header carrying the id under which an error response was logged
pub const ERROR_ID_HEADER: &str = "x-error-id";

/// Wire shape of every error: `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Errors a handler can return
#[derive(Error, Debug)]
pub enum AppError {
    /// The addressed record does not exist; `message` is sent verbatim
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v7(Timestamp::now(NoContext));
        let status = self.status();

        let message = match self {
            AppError::NotFound(message) => {
                tracing::debug!(error_id = %error_id, %message, "record not found");
                message
            }
            AppError::Internal(e) => {
                tracing::error!(error_id = %error_id, error = ?e, "request failed");
                // Database details stay in the logs outside debug builds
                if cfg!(debug_assertions) {
                    format!("{:#}", e)
                } else {
                    "An internal server error occurred".to_string()
                }
            }
        };

        let mut response = (status, Json(ErrorBody { message })).into_response();
        if let Ok(value) = HeaderValue::from_str(&error_id.to_string()) {
            response.headers_mut().insert(ERROR_ID_HEADER, value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_body_is_message_only() {
        let response = AppError::not_found("No term found!").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(ERROR_ID_HEADER));

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({"message": "No term found!"}));
    }

    #[tokio::test]
    async fn internal_error_is_500_with_message() {
        let error: AppError = anyhow::anyhow!("connection refused")
            .context("failed to list books")
            .into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(body["message"].is_string());
        assert_eq!(body.as_object().unwrap().len(), 1);
    }

    #[test]
    fn error_ids_differ_per_response() {
        let a = AppError::not_found("x").into_response();
        let b = AppError::not_found("x").into_response();
        assert_ne!(a.headers()[ERROR_ID_HEADER], b.headers()[ERROR_ID_HEADER]);
    }
}
