use reqwest::Client;
use serde::Serialize;
use tracing::error;

use crate::domain::{
    common::{OAuthClientConfig, ServiceAccountConfig, UpstreamConfig, entities::app_errors::CoreError},
    credential::{entities::TokenGrant, ports::OAuthPort},
};

use super::errors::map_oauth_status;

pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
pub const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";

#[derive(Serialize)]
struct AssertionGrantForm<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    assertion: &'a str,
}

#[derive(Serialize)]
struct AuthorizationCodeForm<'a> {
    grant_type: &'a str,
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
}

/// reqwest adapter for the OAuth token endpoint.
#[derive(Debug, Clone)]
pub struct BoxOAuthClient {
    token_url: String,
    service_account: ServiceAccountConfig,
    oauth: OAuthClientConfig,
    client: Client,
}

impl BoxOAuthClient {
    pub fn new(
        upstream: &UpstreamConfig,
        oauth: OAuthClientConfig,
        service_account: ServiceAccountConfig,
    ) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(upstream.timeout)
            .build()
            .map_err(|e| CoreError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            token_url: upstream.token_url.clone(),
            service_account,
            oauth,
            client,
        })
    }

    async fn request_token<F: Serialize + ?Sized>(&self, form: &F) -> Result<TokenGrant, CoreError> {
        let response = self
            .client
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(|e| {
                error!("token endpoint request failed: {}", e);
                CoreError::Authentication(format!("token endpoint unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("token endpoint error: {} - {}", status, body);
            return Err(map_oauth_status(status, &body));
        }

        response.json::<TokenGrant>().await.map_err(|e| {
            error!("failed to parse token response: {}", e);
            CoreError::Authentication(format!("invalid token response: {}", e))
        })
    }
}

impl OAuthPort for BoxOAuthClient {
    async fn exchange_assertion(&self, assertion: &str) -> Result<TokenGrant, CoreError> {
        let form = AssertionGrantForm {
            grant_type: JWT_BEARER_GRANT,
            client_id: &self.service_account.client_id,
            client_secret: &self.service_account.client_secret,
            assertion,
        };

        self.request_token(&form).await
    }

    async fn exchange_authorization_code(&self, code: &str) -> Result<TokenGrant, CoreError> {
        let form = AuthorizationCodeForm {
            grant_type: AUTHORIZATION_CODE_GRANT,
            code,
            client_id: &self.oauth.client_id,
            client_secret: &self.oauth.client_secret,
            redirect_uri: &self.oauth.redirect_uri,
        };

        self.request_token(&form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_form_encoding() {
        let form = AssertionGrantForm {
            grant_type: JWT_BEARER_GRANT,
            client_id: "svc",
            client_secret: "secret",
            assertion: "a.b.c",
        };

        let encoded = serde_urlencoded::to_string(&form).unwrap();

        assert_eq!(
            encoded,
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer\
             &client_id=svc&client_secret=secret&assertion=a.b.c"
        );
    }
}
