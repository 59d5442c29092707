use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::ServiceAccountConfig;

/// Lifetime of a signed assertion, in seconds.
pub const ASSERTION_LIFETIME_SECS: i64 = 45;

/// Which credentials may authorize an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialRequirement {
    /// Use the caller's token when present, otherwise the service account.
    UserOrServiceAccount,
    /// The caller's own token is mandatory.
    UserOnly,
    /// Always the service account, whatever the caller supplied.
    ServiceAccountOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Enterprise,
    User,
}

/// Claims of the JWT assertion exchanged for a service-account token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub sub: String,
    pub box_sub_type: SubjectType,
    pub aud: String,
    pub jti: String,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(account: &ServiceAccountConfig, audience: &str, now: DateTime<Utc>) -> Self {
        let (sub, box_sub_type) = match account
            .impersonate_user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            Some(user_id) => (user_id.to_string(), SubjectType::User),
            None => (account.enterprise_id.clone(), SubjectType::Enterprise),
        };

        Self {
            iss: account.client_id.clone(),
            sub,
            box_sub_type,
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        }
    }
}
