use std::sync::Arc;

use tracing::info;

use crate::{
    domain::common::{PortalConfig, clock::SystemClock, entities::app_errors::CoreError, services::Service},
    infrastructure::box_api::{
        assertion_signer::RsaAssertionSigner, client::BoxApiClient, oauth_client::BoxOAuthClient,
    },
};

/// Service wired to the real upstream adapters.
pub type PortalService = Service<BoxApiClient, BoxOAuthClient, RsaAssertionSigner>;

/// Builds the application service and its caches.
///
/// Service-account material is only checked when a service token is first
/// needed, so a portal running purely on user logins starts without it.
pub fn create_service(config: PortalConfig) -> Result<PortalService, CoreError> {
    let content_api = BoxApiClient::new(&config.upstream)?;
    let oauth = BoxOAuthClient::new(
        &config.upstream,
        config.oauth.clone(),
        config.service_account.clone(),
    )?;
    let signer = RsaAssertionSigner::new(&config.service_account);

    if let Err(e) = config.service_account.validate() {
        info!("service account fallback disabled until configured: {}", e);
    }

    Ok(Service::new(
        content_api,
        oauth,
        signer,
        Arc::new(SystemClock),
        config,
    ))
}
