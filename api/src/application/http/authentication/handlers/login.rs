use axum::{extract::State, response::Redirect};
use boxportal_core::domain::credential::ports::UserAuthService;
use tracing::debug;

use crate::application::http::server::app_state::AppState;

#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    summary = "Start the authorization code flow",
    responses(
        (status = 303, description = "Redirect to the upstream authorize endpoint")
    )
)]
pub async fn login(State(state): State<AppState>) -> Redirect {
    let url = state.service.authorize_url();
    debug!("redirecting to authorize endpoint");

    Redirect::to(&url)
}
