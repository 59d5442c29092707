use std::fmt;
use std::time::Duration;

use sha2::{Digest, Sha256};

use crate::domain::common::entities::app_errors::CoreError;

pub mod cache;
pub mod clock;
pub mod entities;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub const DEFAULT_API_BASE_URL: &str = "https://api.box.com/2.0";
pub const DEFAULT_TOKEN_URL: &str = "https://api.box.com/oauth2/token";
pub const DEFAULT_AUTHORIZE_URL: &str = "https://account.box.com/api/oauth2/authorize";

#[derive(Clone, Debug)]
pub struct PortalConfig {
    pub upstream: UpstreamConfig,
    pub oauth: OAuthClientConfig,
    pub service_account: ServiceAccountConfig,
    pub cache: CacheConfig,
}

#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub api_base_url: String,
    pub token_url: String,
    pub authorize_url: String,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// OAuth application used for the end-user authorization-code flow.
#[derive(Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Server-to-server (JWT) application identity.
#[derive(Clone, Default)]
pub struct ServiceAccountConfig {
    pub enterprise_id: String,
    pub client_id: String,
    pub client_secret: String,
    /// Encrypted PKCS#8 PEM. Literal `\n` sequences are accepted.
    pub private_key: String,
    pub passphrase: String,
    pub public_key_id: Option<String>,
    pub impersonate_user_id: Option<String>,
}

impl ServiceAccountConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        let required = [
            ("enterprise_id", &self.enterprise_id),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("private_key", &self.private_key),
            ("passphrase", &self.passphrase),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Configuration(format!(
                "service account is missing: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn enterprise_id(&self) -> Option<&str> {
        let id = self.enterprise_id.trim();
        (!id.is_empty()).then_some(id)
    }
}

impl fmt::Debug for ServiceAccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountConfig")
            .field("enterprise_id", &self.enterprise_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("private_key", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .field("public_key_id", &self.public_key_id)
            .field("impersonate_user_id", &self.impersonate_user_id)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub folder_info_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            folder_info_ttl: Duration::from_secs(60),
        }
    }
}

/// Short, non-reversible identifier for a bearer token, safe to use in cache keys.
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let hash = hasher.finalize();
    hex::encode(&hash[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_every_missing_field() {
        let config = ServiceAccountConfig {
            enterprise_id: "123".to_string(),
            client_id: "client".to_string(),
            ..Default::default()
        };

        let err = config.validate().unwrap_err();

        assert_eq!(
            err,
            CoreError::Configuration(
                "service account is missing: client_secret, private_key, passphrase".to_string()
            )
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ServiceAccountConfig {
            client_secret: "s3cr3t".to_string(),
            passphrase: "hunter2".to_string(),
            ..Default::default()
        };

        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("s3cr3t"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_token_fingerprint_is_stable_and_short() {
        let first = token_fingerprint("abc");
        let second = token_fingerprint("abc");

        assert_eq!(first, second);
        assert_eq!(first.len(), 16);
        assert_ne!(first, token_fingerprint("abd"));
    }
}
