use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    content::entities::{
        BoxUser, DownloadLink, FileMetadata, FolderInfo, FolderItems, MetadataTemplate,
        PreviewLink,
    },
    credential::entities::{BearerToken, UserToken},
    search::{entities::SearchResults, value_objects::SearchQuery},
};

/// Port for the upstream content API.
///
/// Every call carries the bearer token chosen by the credential selector.
/// Implementations map upstream failures onto `CoreError`.
#[cfg_attr(test, mockall::automock)]
pub trait ContentApiPort: Send + Sync {
    fn list_folder_items(
        &self,
        token: &BearerToken,
        folder_id: &str,
    ) -> impl Future<Output = Result<FolderItems, CoreError>> + Send;

    fn get_file_metadata(
        &self,
        token: &BearerToken,
        file_id: &str,
    ) -> impl Future<Output = Result<FileMetadata, CoreError>> + Send;

    fn get_folder(
        &self,
        token: &BearerToken,
        folder_id: &str,
    ) -> impl Future<Output = Result<FolderInfo, CoreError>> + Send;

    /// Embeddable preview URL, `None` when the file has none.
    fn get_embed_link(
        &self,
        token: &BearerToken,
        file_id: &str,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;

    /// Redirect target of the content endpoint, `None` when no redirect came back.
    fn get_content_location(
        &self,
        token: &BearerToken,
        file_id: &str,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;

    fn search(
        &self,
        token: &BearerToken,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchResults, CoreError>> + Send;

    fn list_metadata_templates(
        &self,
        token: &BearerToken,
        scope: &str,
    ) -> impl Future<Output = Result<Vec<MetadataTemplate>, CoreError>> + Send;

    fn get_metadata_template_schema(
        &self,
        token: &BearerToken,
        scope: &str,
        template_key: &str,
    ) -> impl Future<Output = Result<MetadataTemplate, CoreError>> + Send;

    fn get_current_user(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<BoxUser, CoreError>> + Send;
}

pub trait ContentService: Send + Sync {
    fn list_folder_items(
        &self,
        user_token: Option<UserToken>,
        folder_id: String,
    ) -> impl Future<Output = Result<FolderItems, CoreError>> + Send;

    fn get_file_metadata(
        &self,
        user_token: Option<UserToken>,
        file_id: String,
    ) -> impl Future<Output = Result<FileMetadata, CoreError>> + Send;

    /// Folder details, served from the folder-info cache when fresh.
    fn get_folder_info(
        &self,
        user_token: Option<UserToken>,
        folder_id: String,
    ) -> impl Future<Output = Result<FolderInfo, CoreError>> + Send;

    fn get_preview_link(
        &self,
        user_token: Option<UserToken>,
        file_id: String,
    ) -> impl Future<Output = Result<PreviewLink, CoreError>> + Send;

    /// Requires the caller's own token.
    fn get_download_link(
        &self,
        user_token: Option<UserToken>,
        file_id: String,
    ) -> impl Future<Output = Result<DownloadLink, CoreError>> + Send;

    /// Account info of whoever the selected credential belongs to.
    fn check_permissions(
        &self,
        user_token: Option<UserToken>,
    ) -> impl Future<Output = Result<BoxUser, CoreError>> + Send;

    fn list_metadata_templates(
        &self,
        user_token: Option<UserToken>,
        scope: String,
    ) -> impl Future<Output = Result<Vec<MetadataTemplate>, CoreError>> + Send;

    fn get_metadata_template_schema(
        &self,
        user_token: Option<UserToken>,
        scope: String,
        template_key: String,
    ) -> impl Future<Output = Result<MetadataTemplate, CoreError>> + Send;
}
