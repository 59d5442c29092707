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
    path = "/{scope}/{template_key}/schema",
    tag = "metadata",
    summary = "Get the field schema of a metadata template",
    params(
        ("scope" = String, Path, description = "Template scope"),
        ("template_key" = String, Path, description = "Template key"),
    ),
    responses(
        (status = 200, description = "Template schema", body = MetadataTemplate),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Template not found")
    )
)]
pub async fn get_template_schema(
    Path((scope, template_key)): Path<(String, String)>,
    State(state): State<AppState>,
    CallerToken(user_token): CallerToken,
) -> Result<Response<MetadataTemplate>, ApiError> {
    let template = state
        .service
        .get_metadata_template_schema(user_token, scope, template_key)
        .await?;

    Ok(Response::OK(template))
}
