use axum::extract::{Path, State};
use boxportal_core::domain::content::ports::ContentService;
use tracing::info;

use crate::application::{
    auth::CallerToken,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/download/{file_id}",
    tag = "file",
    summary = "Redirect to the file's download URL",
    description = "Downloads always run with the caller's own token.",
    params(
        ("file_id" = String, Path, description = "File id"),
    ),
    responses(
        (status = 307, description = "Redirect to the upstream download URL"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No download available")
    )
)]
pub async fn download_file(
    Path(file_id): Path<String>,
    State(state): State<AppState>,
    CallerToken(user_token): CallerToken,
) -> Result<Response<()>, ApiError> {
    let link = state
        .service
        .get_download_link(user_token, file_id.clone())
        .await?;

    info!(file_id = %file_id, "redirecting to download location");

    Ok(Response::TemporaryRedirect(link.url))
}
