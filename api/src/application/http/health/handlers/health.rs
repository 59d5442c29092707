use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, description = "The service is up", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Result<Response<HealthResponse>, ApiError> {
    Ok(Response::OK(HealthResponse {
        status: "ok".to_string(),
        timestamp: state.service.clock().now(),
    }))
}
