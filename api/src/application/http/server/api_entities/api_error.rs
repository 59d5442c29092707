use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use boxportal_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, &str) {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST", message),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, "E_UNAUTHORIZED", message),
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, "E_FORBIDDEN", message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "E_NOT_FOUND", message),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, "E_BAD_GATEWAY", message),
            ApiError::InternalServerError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "E_INTERNAL_SERVER_ERROR",
                message,
            ),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Configuration(message) => {
                error!("configuration error: {}", message);
                ApiError::InternalServerError("Server is not configured for this operation".to_string())
            }
            CoreError::Authentication(message) => ApiError::Unauthorized(message),
            CoreError::AuthenticationRequired => {
                ApiError::Unauthorized("You must be logged in to perform this action".to_string())
            }
            CoreError::Forbidden(message) => ApiError::Forbidden(message),
            CoreError::NotFound(message) => ApiError::NotFound(message),
            CoreError::PreviewUnavailable => {
                ApiError::NotFound("No preview available for this file".to_string())
            }
            CoreError::DownloadUnavailable => {
                ApiError::NotFound("No download location returned for this file".to_string())
            }
            CoreError::InvalidFilter(message) => ApiError::BadRequest(message),
            err @ (CoreError::Upstream { .. } | CoreError::ExternalServiceError(_)) => {
                ApiError::BadGateway(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = ApiErrorResponse {
            code: code.to_string(),
            message: message.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_http_classes() {
        let cases = [
            (CoreError::Configuration("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (CoreError::Authentication("x".into()), StatusCode::UNAUTHORIZED),
            (CoreError::AuthenticationRequired, StatusCode::UNAUTHORIZED),
            (CoreError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (CoreError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                CoreError::Upstream {
                    status: 500,
                    message: "x".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (CoreError::PreviewUnavailable, StatusCode::NOT_FOUND),
            (CoreError::DownloadUnavailable, StatusCode::NOT_FOUND),
            (CoreError::ExternalServiceError("x".into()), StatusCode::BAD_GATEWAY),
            (CoreError::InvalidFilter("x".into()), StatusCode::BAD_REQUEST),
        ];

        for (core, status) in cases {
            assert_eq!(ApiError::from(core).into_response().status(), status);
        }
    }

    #[test]
    fn test_configuration_detail_is_not_leaked() {
        let api = ApiError::from(CoreError::Configuration(
            "service account is missing: private_key".to_string(),
        ));

        assert!(!api.to_string().contains("private_key"));
    }
}
