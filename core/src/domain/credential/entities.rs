use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Bearer token belonging to an end user, as supplied by the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct UserToken(String);

impl UserToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserToken(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    User,
    ServiceAccount,
}

/// The credential actually sent upstream.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    token: String,
    origin: TokenOrigin,
}

impl BearerToken {
    pub fn user(token: UserToken) -> Self {
        Self {
            token: token.0,
            origin: TokenOrigin::User,
        }
    }

    pub fn service_account(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            origin: TokenOrigin::ServiceAccount,
        }
    }

    pub fn secret(&self) -> &str {
        &self.token
    }

    pub fn origin(&self) -> TokenOrigin {
        self.origin
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Result of an OAuth token exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: i64,
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}
