use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use crate::application::{
    auth::{auth, require_login},
    http::server::app_state::AppState,
};

use super::handlers::{
    check_permissions::{__path_check_permissions, check_permissions},
    download_file::{__path_download_file, download_file},
    get_file_metadata::{__path_get_file_metadata, get_file_metadata},
    get_folder_info::{
        __path_get_folder_info, __path_get_root_folder_info, get_folder_info,
        get_root_folder_info,
    },
    get_preview::{__path_get_preview, get_preview},
    list_folder_items::{
        __path_list_folder_items, __path_list_root_folder_items, list_folder_items,
        list_root_folder_items,
    },
};

#[derive(OpenApi)]
#[openapi(paths(
    list_root_folder_items,
    list_folder_items,
    get_file_metadata,
    get_root_folder_info,
    get_folder_info,
    get_preview,
    download_file,
    check_permissions
))]
pub struct FileApiDoc;

pub fn file_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/files", root_path), get(list_root_folder_items))
        .route(
            &format!("{}/files/{{folder_id}}", root_path),
            get(list_folder_items),
        )
        .route(
            &format!("{}/files/metadata/{{file_id}}", root_path),
            get(get_file_metadata),
        )
        .route(
            &format!("{}/files/folderinfo", root_path),
            get(get_root_folder_info),
        )
        .route(
            &format!("{}/files/folderinfo/{{folder_id}}", root_path),
            get(get_folder_info),
        )
        .route(
            &format!("{}/files/preview/{{file_id}}", root_path),
            get(get_preview),
        )
        .route(
            &format!("{}/files/download/{{file_id}}", root_path),
            get(download_file),
        )
        .route(
            &format!("{}/files/permissions/check", root_path),
            get(check_permissions),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_login))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
