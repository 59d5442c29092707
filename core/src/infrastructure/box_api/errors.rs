use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::common::entities::app_errors::CoreError;

/// Error document of the content API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Error document of the OAuth token endpoint.
#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

fn describe(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ApiErrorBody {
            code: Some(code), ..
        }) => code,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("unknown upstream error")
            .to_string(),
    }
}

/// Maps a non-success content API response onto the domain error.
pub(crate) fn map_api_status(status: StatusCode, body: &str) -> CoreError {
    let message = describe(status, body);

    match status {
        StatusCode::UNAUTHORIZED => CoreError::Authentication(message),
        StatusCode::FORBIDDEN => CoreError::Forbidden(message),
        StatusCode::NOT_FOUND => CoreError::NotFound(message),
        _ => CoreError::Upstream {
            status: status.as_u16(),
            message,
        },
    }
}

/// Every token endpoint failure is an authentication failure.
pub(crate) fn map_oauth_status(status: StatusCode, body: &str) -> CoreError {
    let message = match serde_json::from_str::<OAuthErrorBody>(body) {
        Ok(OAuthErrorBody {
            error_description: Some(description),
            ..
        }) => description,
        Ok(OAuthErrorBody {
            error: Some(error), ..
        }) => error,
        _ => describe(status, body),
    };

    CoreError::Authentication(format!("token endpoint returned {}: {}", status.as_u16(), message))
}

pub(crate) fn map_transport(err: reqwest::Error) -> CoreError {
    if err.is_timeout() {
        CoreError::ExternalServiceError(format!("upstream request timed out: {}", err))
    } else {
        CoreError::ExternalServiceError(format!("upstream request failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_and_not_found_keep_their_class() {
        let body = r#"{"type":"error","status":403,"code":"access_denied_insufficient_permissions","message":"Access denied"}"#;

        assert_eq!(
            map_api_status(StatusCode::FORBIDDEN, body),
            CoreError::Forbidden("Access denied".to_string())
        );
        assert_eq!(
            map_api_status(StatusCode::NOT_FOUND, r#"{"code":"not_found"}"#),
            CoreError::NotFound("not_found".to_string())
        );
    }

    #[test]
    fn test_expired_token_is_an_authentication_error() {
        let err = map_api_status(StatusCode::UNAUTHORIZED, "");

        assert_eq!(err, CoreError::Authentication("Unauthorized".to_string()));
    }

    #[test]
    fn test_other_statuses_are_upstream_errors() {
        let err = map_api_status(StatusCode::BAD_REQUEST, "query is required");

        assert_eq!(
            err,
            CoreError::Upstream {
                status: 400,
                message: "query is required".to_string()
            }
        );
    }

    #[test]
    fn test_oauth_error_uses_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Please check the 'sub' claim."}"#;

        let err = map_oauth_status(StatusCode::BAD_REQUEST, body);

        assert_eq!(
            err,
            CoreError::Authentication(
                "token endpoint returned 400: Please check the 'sub' claim.".to_string()
            )
        );
    }
}
