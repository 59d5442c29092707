use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use crate::application::{
    auth::{auth, require_login},
    http::server::app_state::AppState,
};

use super::handlers::search_files::{
    __path_search_files, __path_search_files_json, search_files, search_files_json,
};

#[derive(OpenApi)]
#[openapi(paths(search_files, search_files_json))]
pub struct SearchApiDoc;

pub fn search_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/files/search", state.args.server.root_path),
            get(search_files).post(search_files_json),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_login))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
