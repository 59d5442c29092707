use axum::{Router, routing::get};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::health::{__path_health, health};

#[derive(OpenApi)]
#[openapi(paths(health))]
pub struct HealthApiDoc;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new().route(&format!("{}/health", root_path), get(health))
}
