use axum::extract::{Path, State};
use boxportal_core::domain::content::{entities::FileMetadata, ports::ContentService};

use crate::application::{
    auth::CallerToken,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/metadata/{file_id}",
    tag = "file",
    summary = "Get the metadata of a file",
    params(
        ("file_id" = String, Path, description = "File id"),
    ),
    responses(
        (status = 200, description = "File metadata", body = FileMetadata),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "File not found")
    )
)]
pub async fn get_file_metadata(
    Path(file_id): Path<String>,
    State(state): State<AppState>,
    CallerToken(user_token): CallerToken,
) -> Result<Response<FileMetadata>, ApiError> {
    let metadata = state.service.get_file_metadata(user_token, file_id).await?;

    Ok(Response::OK(metadata))
}
