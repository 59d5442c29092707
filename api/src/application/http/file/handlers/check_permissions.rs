use axum::extract::State;
use boxportal_core::domain::content::{entities::BoxUser, ports::ContentService};

use crate::application::{
    auth::CallerToken,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/permissions/check",
    tag = "file",
    summary = "Account info of the credential the portal acts with",
    responses(
        (status = 200, description = "Account info", body = BoxUser),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn check_permissions(
    State(state): State<AppState>,
    CallerToken(user_token): CallerToken,
) -> Result<Response<BoxUser>, ApiError> {
    let user = state.service.check_permissions(user_token).await?;

    Ok(Response::OK(user))
}
