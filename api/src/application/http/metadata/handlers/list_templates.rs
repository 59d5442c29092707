use axum::extract::{Path, State};
use boxportal_core::domain::content::{entities::MetadataTemplate, ports::ContentService};

use crate::application::{
    auth::CallerToken,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/{scope}",
    tag = "metadata",
    summary = "List the metadata templates of a scope",
    description = "Templates are always read with the service credential.",
    params(
        ("scope" = String, Path, description = "Template scope, e.g. `enterprise` or `global`"),
    ),
    responses(
        (status = 200, description = "Templates", body = Vec<MetadataTemplate>),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Service account is not configured")
    )
)]
pub async fn list_templates(
    Path(scope): Path<String>,
    State(state): State<AppState>,
    CallerToken(user_token): CallerToken,
) -> Result<Response<Vec<MetadataTemplate>>, ApiError> {
    let templates = state
        .service
        .list_metadata_templates(user_token, scope)
        .await?;

    Ok(Response::OK(templates))
}
