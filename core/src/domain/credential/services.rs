use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::domain::{
    common::{clock::Clock, entities::app_errors::CoreError, services::Service},
    content::{entities::BoxUser, ports::ContentApiPort},
    credential::{
        entities::{BearerToken, TokenGrant, UserToken},
        ports::{AssertionSigner, CredentialService, OAuthPort, UserAuthService},
        value_objects::{AssertionClaims, CredentialRequirement},
    },
};

pub const SERVICE_TOKEN_CACHE_KEY: &str = "box_access_token";

/// Seconds shaved off a token's advertised lifetime before caching it.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

impl<C, O, S> CredentialService for Service<C, O, S>
where
    C: ContentApiPort,
    O: OAuthPort,
    S: AssertionSigner,
{
    async fn resolve_credential(
        &self,
        user_token: Option<UserToken>,
        requirement: CredentialRequirement,
    ) -> Result<BearerToken, CoreError> {
        match (user_token, requirement) {
            (Some(token), CredentialRequirement::UserOrServiceAccount)
            | (Some(token), CredentialRequirement::UserOnly) => Ok(BearerToken::user(token)),
            (None, CredentialRequirement::UserOnly) => Err(CoreError::AuthenticationRequired),
            _ => self.service_account_token().await,
        }
    }

    #[instrument(skip(self))]
    async fn service_account_token(&self) -> Result<BearerToken, CoreError> {
        if let Some(token) = self.token_cache.get(SERVICE_TOKEN_CACHE_KEY) {
            debug!("service account token served from cache");
            return Ok(BearerToken::service_account(token));
        }

        let account = &self.config.service_account;
        account.validate()?;

        let claims = AssertionClaims::new(account, &self.config.upstream.token_url, self.clock.now());
        let assertion = self.signer.sign(&claims)?;

        let grant = self.oauth.exchange_assertion(&assertion).await.map_err(|e| {
            warn!("service account token exchange failed: {}", e);
            e
        })?;

        let ttl_secs = grant.expires_in - TOKEN_EXPIRY_MARGIN_SECS;
        if ttl_secs > 0 {
            self.token_cache.insert_with_ttl(
                SERVICE_TOKEN_CACHE_KEY.to_string(),
                grant.access_token.clone(),
                Duration::from_secs(ttl_secs as u64),
            );
        }

        info!(expires_in = grant.expires_in, "service account token issued");
        Ok(BearerToken::service_account(grant.access_token))
    }
}

impl<C, O, S> UserAuthService for Service<C, O, S>
where
    C: ContentApiPort,
    O: OAuthPort,
    S: AssertionSigner,
{
    fn authorize_url(&self) -> String {
        let oauth = &self.config.oauth;
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope={}",
            self.config.upstream.authorize_url,
            urlencoding::encode(&oauth.client_id),
            urlencoding::encode(&oauth.redirect_uri),
            urlencoding::encode(&oauth.scope),
        )
    }

    #[instrument(skip(self, code))]
    async fn exchange_authorization_code(&self, code: String) -> Result<TokenGrant, CoreError> {
        if code.trim().is_empty() {
            return Err(CoreError::Authentication(
                "authorization code is empty".to_string(),
            ));
        }

        self.oauth.exchange_authorization_code(&code).await
    }

    #[instrument(skip(self, user_token))]
    async fn current_user(&self, user_token: UserToken) -> Result<BoxUser, CoreError> {
        self.content_api
            .get_current_user(&BearerToken::user(user_token))
            .await
    }
}
