use axum::{Router, routing::get};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::{
    callback::{__path_callback, callback},
    login::{__path_login, login},
    logout::{__path_logout, logout},
    status::{__path_status, status},
};

#[derive(OpenApi)]
#[openapi(paths(login, callback, status, logout))]
pub struct AuthenticationApiDoc;

pub fn authentication_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{}/auth/login", root_path), get(login))
        .route(&format!("{}/auth/callback", root_path), get(callback))
        .route(&format!("{}/auth/status", root_path), get(status))
        .route(&format!("{}/auth/logout", root_path), get(logout))
}
