use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    content::entities::BoxUser,
    credential::{
        entities::{BearerToken, TokenGrant, UserToken},
        value_objects::{AssertionClaims, CredentialRequirement},
    },
};

/// Signs service-account assertions with the application's private key.
#[cfg_attr(test, mockall::automock)]
pub trait AssertionSigner: Send + Sync {
    fn sign(&self, claims: &AssertionClaims) -> Result<String, CoreError>;
}

/// Port for the upstream OAuth token endpoint.
#[cfg_attr(test, mockall::automock)]
pub trait OAuthPort: Send + Sync {
    /// Exchange a signed JWT assertion for a service-account token
    fn exchange_assertion(
        &self,
        assertion: &str,
    ) -> impl Future<Output = Result<TokenGrant, CoreError>> + Send;

    /// Exchange an authorization code for a user token
    fn exchange_authorization_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<TokenGrant, CoreError>> + Send;
}

pub trait CredentialService: Send + Sync {
    /// Pick the bearer token that authorizes an upstream call.
    fn resolve_credential(
        &self,
        user_token: Option<UserToken>,
        requirement: CredentialRequirement,
    ) -> impl Future<Output = Result<BearerToken, CoreError>> + Send;

    /// Cached service-account token, refreshed through an assertion exchange on miss.
    fn service_account_token(&self) -> impl Future<Output = Result<BearerToken, CoreError>> + Send;
}

pub trait UserAuthService: Send + Sync {
    fn authorize_url(&self) -> String;

    fn exchange_authorization_code(
        &self,
        code: String,
    ) -> impl Future<Output = Result<TokenGrant, CoreError>> + Send;

    fn current_user(
        &self,
        user_token: UserToken,
    ) -> impl Future<Output = Result<BoxUser, CoreError>> + Send;
}
