use tracing::{debug, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service, token_fingerprint},
    content::{
        entities::{
            BoxUser, DownloadLink, FileMetadata, FolderInfo, FolderItems, MetadataTemplate,
            PreviewLink,
        },
        ports::{ContentApiPort, ContentService},
    },
    credential::{
        entities::UserToken,
        ports::{AssertionSigner, CredentialService, OAuthPort},
        value_objects::CredentialRequirement,
    },
    search::translator::ROOT_FOLDER_ID,
};

/// Prefix the UI puts on folder ids.
const FOLDER_ID_PREFIX: &str = "d_";

/// Strips the UI prefix; an empty id means the root folder.
pub fn normalize_folder_id(folder_id: &str) -> String {
    let id = folder_id.trim();
    let id = id.strip_prefix(FOLDER_ID_PREFIX).unwrap_or(id);

    if id.is_empty() {
        ROOT_FOLDER_ID.to_string()
    } else {
        id.to_string()
    }
}

fn folder_info_key(folder_id: &str, token: &str) -> String {
    format!("folder_info:{}:{}", folder_id, token_fingerprint(token))
}

impl<C, O, S> ContentService for Service<C, O, S>
where
    C: ContentApiPort,
    O: OAuthPort,
    S: AssertionSigner,
{
    #[instrument(skip(self, user_token))]
    async fn list_folder_items(
        &self,
        user_token: Option<UserToken>,
        folder_id: String,
    ) -> Result<FolderItems, CoreError> {
        let folder_id = normalize_folder_id(&folder_id);
        let token = self
            .resolve_credential(user_token, CredentialRequirement::UserOrServiceAccount)
            .await?;

        self.content_api.list_folder_items(&token, &folder_id).await
    }

    #[instrument(skip(self, user_token))]
    async fn get_file_metadata(
        &self,
        user_token: Option<UserToken>,
        file_id: String,
    ) -> Result<FileMetadata, CoreError> {
        let token = self
            .resolve_credential(user_token, CredentialRequirement::UserOrServiceAccount)
            .await?;

        self.content_api.get_file_metadata(&token, &file_id).await
    }

    #[instrument(skip(self, user_token))]
    async fn get_folder_info(
        &self,
        user_token: Option<UserToken>,
        folder_id: String,
    ) -> Result<FolderInfo, CoreError> {
        let folder_id = normalize_folder_id(&folder_id);
        let token = self
            .resolve_credential(user_token, CredentialRequirement::UserOrServiceAccount)
            .await?;

        let key = folder_info_key(&folder_id, token.secret());
        if let Some(info) = self.folder_info_cache.get(&key) {
            debug!(folder_id = %folder_id, "folder info served from cache");
            return Ok(info);
        }

        let info = self.content_api.get_folder(&token, &folder_id).await?;
        self.folder_info_cache.insert(key, info.clone());

        Ok(info)
    }

    #[instrument(skip(self, user_token))]
    async fn get_preview_link(
        &self,
        user_token: Option<UserToken>,
        file_id: String,
    ) -> Result<PreviewLink, CoreError> {
        let token = self
            .resolve_credential(user_token, CredentialRequirement::UserOrServiceAccount)
            .await?;

        self.content_api
            .get_embed_link(&token, &file_id)
            .await?
            .map(|url| PreviewLink { url })
            .ok_or(CoreError::PreviewUnavailable)
    }

    #[instrument(skip(self, user_token))]
    async fn get_download_link(
        &self,
        user_token: Option<UserToken>,
        file_id: String,
    ) -> Result<DownloadLink, CoreError> {
        let token = self
            .resolve_credential(user_token, CredentialRequirement::UserOnly)
            .await?;

        self.content_api
            .get_content_location(&token, &file_id)
            .await?
            .map(|url| DownloadLink { url })
            .ok_or(CoreError::DownloadUnavailable)
    }

    #[instrument(skip(self, user_token))]
    async fn check_permissions(&self, user_token: Option<UserToken>) -> Result<BoxUser, CoreError> {
        let token = self
            .resolve_credential(user_token, CredentialRequirement::UserOrServiceAccount)
            .await?;

        self.content_api.get_current_user(&token).await
    }

    #[instrument(skip(self, user_token))]
    async fn list_metadata_templates(
        &self,
        user_token: Option<UserToken>,
        scope: String,
    ) -> Result<Vec<MetadataTemplate>, CoreError> {
        let token = self
            .resolve_credential(user_token, CredentialRequirement::ServiceAccountOnly)
            .await?;

        self.content_api.list_metadata_templates(&token, &scope).await
    }

    #[instrument(skip(self, user_token))]
    async fn get_metadata_template_schema(
        &self,
        user_token: Option<UserToken>,
        scope: String,
        template_key: String,
    ) -> Result<MetadataTemplate, CoreError> {
        let token = self
            .resolve_credential(user_token, CredentialRequirement::ServiceAccountOnly)
            .await?;

        self.content_api
            .get_metadata_template_schema(&token, &scope, &template_key)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use chrono::TimeDelta;

    use super::*;
    use crate::domain::{
        common::test_support::{FakeContentApi, FakeOAuth, Harness, portal_config},
        credential::entities::TokenOrigin,
    };

    fn harness_with(content: FakeContentApi) -> Harness {
        Harness::with(content, FakeOAuth::default(), portal_config())
    }

    #[test]
    fn test_normalize_folder_id() {
        assert_eq!(normalize_folder_id("d_12345"), "12345");
        assert_eq!(normalize_folder_id("12345"), "12345");
        assert_eq!(normalize_folder_id(""), "0");
        assert_eq!(normalize_folder_id("d_"), "0");
    }

    #[tokio::test]
    async fn test_folder_listing_strips_ui_prefix() {
        let harness = Harness::new();

        let items = harness
            .service
            .list_folder_items(Some(UserToken::new("u")), "d_777".to_string())
            .await
            .unwrap();

        assert_eq!(items.entries.len(), 2);
        assert_eq!(harness.content().last_id().as_deref(), Some("777"));
    }

    #[tokio::test]
    async fn test_folder_listing_falls_back_to_service_account() {
        let harness = Harness::new();

        harness
            .service
            .list_folder_items(None, "0".to_string())
            .await
            .unwrap();

        let token = harness.content().last_token().unwrap();
        assert_eq!(token.origin(), TokenOrigin::ServiceAccount);
    }

    #[tokio::test]
    async fn test_folder_info_is_cached_per_token() {
        let harness = Harness::new();
        let service = &harness.service;

        service
            .get_folder_info(Some(UserToken::new("alice")), "42".to_string())
            .await
            .unwrap();
        service
            .get_folder_info(Some(UserToken::new("alice")), "d_42".to_string())
            .await
            .unwrap();
        service
            .get_folder_info(Some(UserToken::new("bob")), "42".to_string())
            .await
            .unwrap();

        assert_eq!(harness.content().folder_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_folder_info_expires_after_ttl() {
        let harness = Harness::new();
        let token = || Some(UserToken::new("alice"));

        harness.service.get_folder_info(token(), "42".to_string()).await.unwrap();
        harness.clock.advance(TimeDelta::seconds(60));
        harness.service.get_folder_info(token(), "42".to_string()).await.unwrap();

        assert_eq!(harness.content().folder_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_purge_drops_expired_folder_info() {
        let harness = Harness::new();

        for n in 0..50 {
            harness
                .service
                .get_folder_info(Some(UserToken::new(format!("user-{n}"))), n.to_string())
                .await
                .unwrap();
        }
        assert_eq!(harness.service.folder_info_cache.len(), 50);

        harness.clock.advance(TimeDelta::hours(24));
        harness
            .service
            .get_folder_info(Some(UserToken::new("late")), "7".to_string())
            .await
            .unwrap();
        let purged = harness.service.purge_expired_caches();

        assert_eq!(purged, 50);
        assert_eq!(harness.service.folder_info_cache.len(), 1);
    }

    #[tokio::test]
    async fn test_purge_keeps_live_folder_info() {
        let harness = Harness::new();

        harness
            .service
            .get_folder_info(Some(UserToken::new("alice")), "42".to_string())
            .await
            .unwrap();
        harness.clock.advance(TimeDelta::seconds(30));

        assert_eq!(harness.service.purge_expired_caches(), 0);
        assert_eq!(harness.service.folder_info_cache.len(), 1);
    }

    #[tokio::test]
    async fn test_preview_without_embed_link_is_unavailable() {
        let harness = Harness::new();

        let err = harness
            .service
            .get_preview_link(Some(UserToken::new("u")), "1".to_string())
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::PreviewUnavailable);
    }

    #[tokio::test]
    async fn test_preview_returns_embed_link() {
        let harness = harness_with(FakeContentApi {
            embed_link: Some("https://app.box.com/preview/expiring_embed/abc".to_string()),
            ..Default::default()
        });

        let link = harness
            .service
            .get_preview_link(None, "1".to_string())
            .await
            .unwrap();

        assert_eq!(link.url, "https://app.box.com/preview/expiring_embed/abc");
    }

    #[tokio::test]
    async fn test_download_requires_user_token() {
        let harness = harness_with(FakeContentApi {
            content_location: Some("https://dl.boxcloud.com/x".to_string()),
            ..Default::default()
        });

        let err = harness
            .service
            .get_download_link(None, "1".to_string())
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::AuthenticationRequired);
        assert_eq!(harness.content().calls.load(Ordering::SeqCst), 0);
        assert_eq!(harness.oauth().assertion_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_download_returns_redirect_location() {
        let harness = harness_with(FakeContentApi {
            content_location: Some("https://dl.boxcloud.com/x".to_string()),
            ..Default::default()
        });

        let link = harness
            .service
            .get_download_link(Some(UserToken::new("u")), "1".to_string())
            .await
            .unwrap();

        assert_eq!(link.url, "https://dl.boxcloud.com/x");
    }

    #[tokio::test]
    async fn test_download_without_location_is_unavailable() {
        let harness = Harness::new();

        let err = harness
            .service
            .get_download_link(Some(UserToken::new("u")), "1".to_string())
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::DownloadUnavailable);
    }

    #[tokio::test]
    async fn test_download_forbidden_is_propagated() {
        let harness = harness_with(FakeContentApi {
            failure: Some(CoreError::Forbidden("access_denied".to_string())),
            ..Default::default()
        });

        let err = harness
            .service
            .get_download_link(Some(UserToken::new("u")), "1".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_metadata_templates_always_use_service_account() {
        let harness = Harness::new();

        let templates = harness
            .service
            .list_metadata_templates(Some(UserToken::new("u")), "enterprise".to_string())
            .await
            .unwrap();

        assert_eq!(templates[0].template_key, "contract");
        let token = harness.content().last_token().unwrap();
        assert_eq!(token.origin(), TokenOrigin::ServiceAccount);
    }

    #[tokio::test]
    async fn test_template_schema_passes_scope_and_key() {
        let harness = Harness::new();

        let schema = harness
            .service
            .get_metadata_template_schema(None, "enterprise_1".to_string(), "contract".to_string())
            .await
            .unwrap();

        assert_eq!(schema.scope, "enterprise_1");
        assert_eq!(schema.template_key, "contract");
    }

    #[tokio::test]
    async fn test_check_permissions_returns_account() {
        let harness = Harness::new();

        let user = harness
            .service
            .check_permissions(Some(UserToken::new("u")))
            .await
            .unwrap();

        assert_eq!(user.id, "4242");
    }
}
