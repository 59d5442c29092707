use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::IntoResponse,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response<T: Serialize> {
    OK(T),
    /// 307 to an absolute URL.
    TemporaryRedirect(String),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::OK(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::TemporaryRedirect(url) => match HeaderValue::from_str(&url) {
                Ok(location) => (StatusCode::TEMPORARY_REDIRECT, [(LOCATION, location)]).into_response(),
                Err(_) => StatusCode::BAD_GATEWAY.into_response(),
            },
        }
    }
}
