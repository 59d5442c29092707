use axum::extract::{Path, State};
use boxportal_core::domain::content::{entities::PreviewLink, ports::ContentService};

use crate::application::{
    auth::CallerToken,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/preview/{file_id}",
    tag = "file",
    summary = "Get an embeddable preview URL for a file",
    params(
        ("file_id" = String, Path, description = "File id"),
    ),
    responses(
        (status = 200, description = "Preview URL", body = PreviewLink),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No preview available")
    )
)]
pub async fn get_preview(
    Path(file_id): Path<String>,
    State(state): State<AppState>,
    CallerToken(user_token): CallerToken,
) -> Result<Response<PreviewLink>, ApiError> {
    let link = state.service.get_preview_link(user_token, file_id).await?;

    Ok(Response::OK(link))
}
