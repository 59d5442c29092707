use std::time::Duration;

use axum::extract::State;
use axum_cookie::prelude::*;
use tracing::info;

use crate::application::{
    auth::SESSION_COOKIE,
    http::{
        authentication::validators::MessageResponse,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    summary = "Destroy the caller's session",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    cookies: CookieManager,
) -> Result<Response<MessageResponse>, ApiError> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value());
        info!("user session destroyed");
    }

    // Attributes must match the callback's cookie or the browser keeps it.
    let mut expired = Cookie::new(SESSION_COOKIE, "");
    expired.set_http_only(true);
    expired.set_secure(state.args.session.cookie_secure);
    expired.set_path("/");
    expired.set_max_age(Duration::ZERO);
    cookies.add(expired);

    Ok(Response::OK(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}
