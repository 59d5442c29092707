use axum::{
    Json,
    extract::{RawQuery, State},
};
use boxportal_core::domain::search::{
    entities::SearchResults,
    ports::SearchService,
    value_objects::{DateBucket, FilterSpec, SizeBucket},
};
use tracing::debug;

use crate::application::{
    auth::CallerToken,
    http::{
        search::validators::SearchRequest,
        search_params::NestedParams,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

async fn run_search(
    state: &AppState,
    user_token: CallerToken,
    request: SearchRequest,
) -> Result<Response<SearchResults>, ApiError> {
    let filter = FilterSpec::try_from(request)?;
    let results = state.service.search_files(user_token.0, filter).await?;

    Ok(Response::OK(results))
}

#[utoipa::path(
    get,
    path = "",
    tag = "search",
    summary = "Search files with the query-string form encoding",
    params(
        ("keyword" = Option<String>, Query, description = "Free text"),
        ("type[<flag>]" = Option<bool>, Query, description = "Type flag, e.g. `type[pdf]=true`"),
        ("date" = Option<DateBucket>, Query, description = "Modification date bucket"),
        ("size" = Option<SizeBucket>, Query, description = "Size bucket"),
        ("owner" = Option<String>, Query, description = "Owner name"),
        ("tags" = Option<String>, Query, description = "Tag text"),
        ("metadata[templateKey]" = Option<String>, Query, description = "Metadata template key"),
        ("metadata[scope]" = Option<String>, Query, description = "Metadata template scope"),
        ("metadata[data][<field>]" = Option<String>, Query, description = "Metadata field value"),
    ),
    responses(
        (status = 200, description = "Search results", body = SearchResults),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn search_files(
    State(state): State<AppState>,
    user_token: CallerToken,
    RawQuery(query): RawQuery,
) -> Result<Response<SearchResults>, ApiError> {
    let params = NestedParams::from_query_string(query.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::BadRequest(format!("invalid query string: {e}")))?;
    debug!(params = ?params, "search parameters");

    let request: SearchRequest = serde_json::from_value(params.into_value())
        .map_err(|e| ApiError::BadRequest(format!("invalid search parameters: {e}")))?;

    run_search(&state, user_token, request).await
}

#[utoipa::path(
    post,
    path = "",
    tag = "search",
    summary = "Search files with a JSON filter",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Search results", body = SearchResults),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn search_files_json(
    State(state): State<AppState>,
    user_token: CallerToken,
    Json(request): Json<SearchRequest>,
) -> Result<Response<SearchResults>, ApiError> {
    run_search(&state, user_token, request).await
}
