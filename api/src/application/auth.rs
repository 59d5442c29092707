use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_cookie::prelude::*;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use boxportal_core::domain::{
    common::{cache::ExpiringCache, clock::Clock},
    credential::entities::{TokenGrant, UserToken},
};
use tracing::debug;
use uuid::Uuid;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub const SESSION_COOKIE: &str = "box_portal.sid";

#[derive(Clone)]
pub struct SessionData {
    pub access_token: UserToken,
    pub refresh_token: Option<String>,
}

/// Server-side login sessions, expiring a fixed time after they were opened.
#[derive(Clone)]
pub struct SessionStore {
    sessions: ExpiringCache<String, SessionData>,
}

impl SessionStore {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            sessions: ExpiringCache::new(clock, ttl),
        }
    }

    /// Stores the grant under a fresh random id and returns that id.
    pub fn open(&self, grant: TokenGrant) -> String {
        let session_id = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            session_id.clone(),
            SessionData {
                access_token: UserToken::new(grant.access_token),
                refresh_token: grant.refresh_token,
            },
        );
        session_id
    }

    pub fn get(&self, session_id: &str) -> Option<SessionData> {
        self.sessions.get(session_id)
    }

    pub fn destroy(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn purge_expired(&self) -> usize {
        self.sessions.purge_expired()
    }
}

fn bearer_token(req: &Request) -> Option<UserToken> {
    req.headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|header| header.token().trim().to_string())
        .filter(|token| !token.is_empty())
        .map(UserToken::new)
}

/// Resolves the caller's user token from the `Authorization` header or the
/// session cookie and stores it in the request extensions.
pub async fn auth(
    State(state): State<AppState>,
    cookies: CookieManager,
    mut req: Request,
    next: Next,
) -> Response {
    let token = bearer_token(&req).or_else(|| {
        cookies
            .get(SESSION_COOKIE)
            .and_then(|cookie| state.sessions.get(cookie.value()))
            .map(|session| session.access_token)
    });

    if let Some(token) = token {
        req.extensions_mut().insert(token);
    } else {
        debug!("request without user token");
    }

    next.run(req).await
}

/// Rejects requests without a user token when login is mandatory.
pub async fn require_login(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.args.session.require_login && req.extensions().get::<UserToken>().is_none() {
        return Err(ApiError::Unauthorized(
            "Not authenticated. Please log in.".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

/// The caller's user token, if the auth middleware found one.
pub struct CallerToken(pub Option<UserToken>);

impl<S> FromRequestParts<S> for CallerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        Ok(CallerToken(parts.extensions.get::<UserToken>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use boxportal_core::domain::common::clock::ManualClock;
    use chrono::{TimeDelta, TimeZone, Utc};

    use super::*;

    fn grant(token: &str) -> TokenGrant {
        TokenGrant {
            access_token: token.to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_in: 3600,
        }
    }

    #[test]
    fn test_session_expires_one_hour_after_opening() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ));
        let store = SessionStore::new(clock.clone(), Duration::from_secs(3600));

        let id = store.open(grant("user-abc"));
        clock.advance(TimeDelta::seconds(3599));
        let live = store.get(&id).unwrap();
        clock.advance(TimeDelta::seconds(1));

        assert_eq!(live.access_token.as_str(), "user-abc");
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = SessionStore::new(clock, Duration::from_secs(3600));

        let first = store.open(grant("a"));
        let second = store.open(grant("b"));

        assert_ne!(first, second);
        assert_eq!(store.get(&second).unwrap().access_token.as_str(), "b");
    }

    #[test]
    fn test_destroyed_session_is_gone() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = SessionStore::new(clock, Duration::from_secs(3600));

        let id = store.open(grant("a"));
        store.destroy(&id);

        assert!(store.get(&id).is_none());
    }
}
