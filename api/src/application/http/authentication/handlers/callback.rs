use axum::{
    extract::{Query, State},
    response::Redirect,
};
use axum_cookie::prelude::*;
use boxportal_core::domain::credential::ports::UserAuthService;
use tracing::{info, warn};

use crate::application::{
    auth::SESSION_COOKIE,
    http::{
        authentication::validators::CallbackQuery,
        server::{api_entities::api_error::ApiError, app_state::AppState},
    },
};

#[utoipa::path(
    get,
    path = "/callback",
    tag = "auth",
    summary = "Finish the authorization code flow and open a session",
    params(CallbackQuery),
    responses(
        (status = 303, description = "Session opened, redirect to the frontend"),
        (status = 400, description = "Authorization code is missing"),
        (status = 401, description = "Code exchange failed")
    )
)]
pub async fn callback(
    State(state): State<AppState>,
    cookies: CookieManager,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect, ApiError> {
    if let Some(error) = &query.error {
        warn!("authorize endpoint returned error: {}", error);
    }

    let code = query
        .code
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Authorization code is missing".to_string()))?;

    let grant = state.service.exchange_authorization_code(code).await?;
    let session_id = state.sessions.open(grant);

    let mut cookie = Cookie::new(SESSION_COOKIE, session_id);
    cookie.set_http_only(true);
    cookie.set_secure(state.args.session.cookie_secure);
    cookie.set_path("/");
    cookies.add(cookie);

    info!("user session opened");

    Ok(Redirect::to(&state.args.session.frontend_url))
}
