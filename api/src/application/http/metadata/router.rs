use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use crate::application::{
    auth::{auth, require_login},
    http::server::app_state::AppState,
};

use super::handlers::{
    get_template_schema::{__path_get_template_schema, get_template_schema},
    list_templates::{__path_list_templates, list_templates},
};

#[derive(OpenApi)]
#[openapi(paths(list_templates, get_template_schema))]
pub struct MetadataApiDoc;

pub fn metadata_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!(
                "{}/files/metadata/templates/{{scope}}",
                state.args.server.root_path
            ),
            get(list_templates),
        )
        .route(
            &format!(
                "{}/files/metadata/templates/{{scope}}/{{template_key}}/schema",
                state.args.server.root_path
            ),
            get(get_template_schema),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_login))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
