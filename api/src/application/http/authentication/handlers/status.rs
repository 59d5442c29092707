use axum::extract::State;
use axum_cookie::prelude::*;

use crate::application::{
    auth::SESSION_COOKIE,
    http::{
        authentication::validators::AuthStatusResponse,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    get,
    path = "/status",
    tag = "auth",
    summary = "Whether the caller has a live session",
    responses(
        (status = 200, description = "Session state", body = AuthStatusResponse)
    )
)]
pub async fn status(
    State(state): State<AppState>,
    cookies: CookieManager,
) -> Result<Response<AuthStatusResponse>, ApiError> {
    let is_authenticated = cookies
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.get(cookie.value()))
        .is_some();

    Ok(Response::OK(AuthStatusResponse { is_authenticated }))
}
