use axum::extract::{Path, State};
use boxportal_core::domain::content::{entities::FolderInfo, ports::ContentService};

use crate::application::{
    auth::CallerToken,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/folderinfo",
    tag = "file",
    summary = "Get the root folder's details",
    responses(
        (status = 200, description = "Folder details", body = FolderInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_root_folder_info(
    State(state): State<AppState>,
    CallerToken(user_token): CallerToken,
) -> Result<Response<FolderInfo>, ApiError> {
    let info = state
        .service
        .get_folder_info(user_token, String::new())
        .await?;

    Ok(Response::OK(info))
}

#[utoipa::path(
    get,
    path = "/folderinfo/{folder_id}",
    tag = "file",
    summary = "Get a folder's details",
    params(
        ("folder_id" = String, Path, description = "Folder id"),
    ),
    responses(
        (status = 200, description = "Folder details", body = FolderInfo),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Folder not found")
    )
)]
pub async fn get_folder_info(
    Path(folder_id): Path<String>,
    State(state): State<AppState>,
    CallerToken(user_token): CallerToken,
) -> Result<Response<FolderInfo>, ApiError> {
    let info = state.service.get_folder_info(user_token, folder_id).await?;

    Ok(Response::OK(info))
}
