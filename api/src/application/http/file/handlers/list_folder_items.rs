use axum::extract::{Path, State};
use boxportal_core::domain::content::{entities::FolderItems, ports::ContentService};

use crate::application::{
    auth::CallerToken,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "",
    tag = "file",
    summary = "List the items of the root folder",
    responses(
        (status = 200, description = "Folder items", body = FolderItems),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_root_folder_items(
    State(state): State<AppState>,
    CallerToken(user_token): CallerToken,
) -> Result<Response<FolderItems>, ApiError> {
    let items = state
        .service
        .list_folder_items(user_token, String::new())
        .await?;

    Ok(Response::OK(items))
}

#[utoipa::path(
    get,
    path = "/{folder_id}",
    tag = "file",
    summary = "List the items of a folder",
    params(
        ("folder_id" = String, Path, description = "Folder id, optionally prefixed with `d_`"),
    ),
    responses(
        (status = 200, description = "Folder items", body = FolderItems),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Folder not found")
    )
)]
pub async fn list_folder_items(
    Path(folder_id): Path<String>,
    State(state): State<AppState>,
    CallerToken(user_token): CallerToken,
) -> Result<Response<FolderItems>, ApiError> {
    let items = state
        .service
        .list_folder_items(user_token, folder_id)
        .await?;

    Ok(Response::OK(items))
}
