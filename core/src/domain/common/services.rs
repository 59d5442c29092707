use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    common::{PortalConfig, cache::ExpiringCache, clock::Clock},
    content::{entities::FolderInfo, ports::ContentApiPort},
    credential::ports::{AssertionSigner, OAuthPort},
};

/// Application service. Every domain service trait is implemented on it.
///
/// The two caches are built once here and shared by every clone, so a single
/// `Service` per process is enough.
pub struct Service<C, O, S>
where
    C: ContentApiPort,
    O: OAuthPort,
    S: AssertionSigner,
{
    pub(crate) content_api: Arc<C>,
    pub(crate) oauth: Arc<O>,
    pub(crate) signer: Arc<S>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) config: Arc<PortalConfig>,
    pub(crate) token_cache: ExpiringCache<String, String>,
    pub(crate) folder_info_cache: ExpiringCache<String, FolderInfo>,
}

impl<C, O, S> Service<C, O, S>
where
    C: ContentApiPort,
    O: OAuthPort,
    S: AssertionSigner,
{
    pub fn new(
        content_api: C,
        oauth: O,
        signer: S,
        clock: Arc<dyn Clock>,
        config: PortalConfig,
    ) -> Self {
        // Token entries are always written with their own lifetime.
        let token_cache = ExpiringCache::new(clock.clone(), Duration::from_secs(60));
        let folder_info_cache = ExpiringCache::new(clock.clone(), config.cache.folder_info_ttl);

        Self {
            content_api: Arc::new(content_api),
            oauth: Arc::new(oauth),
            signer: Arc::new(signer),
            clock,
            config: Arc::new(config),
            token_cache,
            folder_info_cache,
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Drops expired token and folder-info entries. Returns how many were removed.
    pub fn purge_expired_caches(&self) -> usize {
        self.token_cache.purge_expired() + self.folder_info_cache.purge_expired()
    }
}

impl<C, O, S> Clone for Service<C, O, S>
where
    C: ContentApiPort,
    O: OAuthPort,
    S: AssertionSigner,
{
    fn clone(&self) -> Self {
        Self {
            content_api: self.content_api.clone(),
            oauth: self.oauth.clone(),
            signer: self.signer.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
            token_cache: self.token_cache.clone(),
            folder_info_cache: self.folder_info_cache.clone(),
        }
    }
}
