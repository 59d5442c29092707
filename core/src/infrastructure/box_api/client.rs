use reqwest::{Client, StatusCode, header::LOCATION, redirect::Policy};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error};

use crate::domain::{
    common::{UpstreamConfig, entities::app_errors::CoreError},
    content::{
        entities::{BoxItem, BoxUser, FileMetadata, FolderInfo, FolderItems, MetadataTemplate},
        ports::ContentApiPort,
    },
    credential::entities::BearerToken,
    search::{entities::SearchResults, value_objects::SearchQuery},
};

use super::errors::{map_api_status, map_transport};

pub const FOLDER_ITEM_FIELDS: &str =
    "id,name,size,modified_at,type,owned_by,shared_link,item_status,tags";
pub const FOLDER_ITEMS_LIMIT: u32 = 1000;
pub const FILE_FIELDS: &str =
    "name,size,modified_at,created_at,extension,sha1,description,owned_by,shared_link,parent";
pub const FOLDER_FIELDS: &str = "id,name,size,created_at,modified_at,item_collection,owned_by";
pub const USER_FIELDS: &str = "id,name,login,role,address,avatar_url,created_at,modified_at,\
language,timezone,space_amount,space_used,max_upload_size,status,job_title,phone";

const NO_QUERY: [(&str, &str); 0] = [];

#[derive(Debug, Serialize)]
struct FieldsQuery<'a> {
    fields: &'a str,
}

#[derive(Debug, Serialize)]
struct PagedFieldsQuery<'a> {
    fields: &'a str,
    limit: u32,
    offset: u32,
}

#[derive(Debug, Deserialize)]
struct EmbedLinkResponse {
    expiring_embed_link: Option<EmbedLink>,
}

#[derive(Debug, Deserialize)]
struct EmbedLink {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    entries: Vec<BoxItem>,
    total_count: Option<u64>,
    limit: Option<u32>,
    offset: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TemplateList {
    #[serde(default)]
    entries: Vec<MetadataTemplate>,
}

/// reqwest adapter for the content API.
#[derive(Debug, Clone)]
pub struct BoxApiClient {
    base_url: String,
    client: Client,
    /// Never follows redirects, so the download location can be read back.
    no_redirect_client: Client,
}

impl BoxApiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, CoreError> {
        let build = |policy: Policy| {
            Client::builder()
                .timeout(config.timeout)
                .redirect(policy)
                .build()
                .map_err(|e| {
                    CoreError::Configuration(format!("failed to build HTTP client: {}", e))
                })
        };

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client: build(Policy::default())?,
            no_redirect_client: build(Policy::none())?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T, Q>(&self, token: &BearerToken, path: &str, query: &Q) -> Result<T, CoreError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!(path = %path, "calling content API");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.secret())
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!("content API request to {} failed: {}", path, e);
                map_transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("content API error on {}: {} - {}", path, status, body);
            return Err(map_api_status(status, &body));
        }

        response.json::<T>().await.map_err(|e| {
            error!("failed to parse content API response from {}: {}", path, e);
            CoreError::ExternalServiceError(format!("invalid response from {}: {}", path, e))
        })
    }
}

fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

impl ContentApiPort for BoxApiClient {
    async fn list_folder_items(
        &self,
        token: &BearerToken,
        folder_id: &str,
    ) -> Result<FolderItems, CoreError> {
        let query = PagedFieldsQuery {
            fields: FOLDER_ITEM_FIELDS,
            limit: FOLDER_ITEMS_LIMIT,
            offset: 0,
        };

        self.get_json(token, &format!("/folders/{}/items", segment(folder_id)), &query)
            .await
    }

    async fn get_file_metadata(
        &self,
        token: &BearerToken,
        file_id: &str,
    ) -> Result<FileMetadata, CoreError> {
        let query = FieldsQuery {
            fields: FILE_FIELDS,
        };

        self.get_json(token, &format!("/files/{}", segment(file_id)), &query)
            .await
    }

    async fn get_folder(&self, token: &BearerToken, folder_id: &str) -> Result<FolderInfo, CoreError> {
        let query = FieldsQuery {
            fields: FOLDER_FIELDS,
        };

        self.get_json(token, &format!("/folders/{}", segment(folder_id)), &query)
            .await
    }

    async fn get_embed_link(
        &self,
        token: &BearerToken,
        file_id: &str,
    ) -> Result<Option<String>, CoreError> {
        let query = FieldsQuery {
            fields: "expiring_embed_link",
        };

        let response: EmbedLinkResponse = self
            .get_json(token, &format!("/files/{}", segment(file_id)), &query)
            .await?;

        Ok(response
            .expiring_embed_link
            .and_then(|link| link.url)
            .filter(|url| !url.is_empty()))
    }

    async fn get_content_location(
        &self,
        token: &BearerToken,
        file_id: &str,
    ) -> Result<Option<String>, CoreError> {
        let path = format!("/files/{}/content", segment(file_id));

        let response = self
            .no_redirect_client
            .get(self.url(&path))
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(|e| {
                error!("download request for file {} failed: {}", file_id, e);
                map_transport(e)
            })?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if status.is_redirection() || status == StatusCode::OK || status == StatusCode::ACCEPTED {
            if location.is_none() {
                debug!(file_id = %file_id, status = %status, "no download location returned");
            }
            return Ok(location);
        }

        let body = response.text().await.unwrap_or_default();
        error!("download request for file {} returned {}: {}", file_id, status, body);
        Err(map_api_status(status, &body))
    }

    async fn search(
        &self,
        token: &BearerToken,
        query: &SearchQuery,
    ) -> Result<SearchResults, CoreError> {
        let response: SearchResponse = self.get_json(token, "/search", query).await?;

        let total_count = response
            .total_count
            .unwrap_or(response.entries.len() as u64);

        Ok(SearchResults {
            total_count,
            limit: response.limit.unwrap_or(query.limit),
            offset: response.offset.unwrap_or(query.offset),
            entries: response.entries,
        })
    }

    async fn list_metadata_templates(
        &self,
        token: &BearerToken,
        scope: &str,
    ) -> Result<Vec<MetadataTemplate>, CoreError> {
        let list: TemplateList = self
            .get_json(token, &format!("/metadata_templates/{}", segment(scope)), &NO_QUERY)
            .await?;

        Ok(list.entries)
    }

    async fn get_metadata_template_schema(
        &self,
        token: &BearerToken,
        scope: &str,
        template_key: &str,
    ) -> Result<MetadataTemplate, CoreError> {
        let path = format!(
            "/metadata_templates/{}/{}/schema",
            segment(scope),
            segment(template_key)
        );

        self.get_json(token, &path, &NO_QUERY).await
    }

    async fn get_current_user(&self, token: &BearerToken) -> Result<BoxUser, CoreError> {
        let query = FieldsQuery {
            fields: USER_FIELDS,
        };

        self.get_json(token, "/users/me", &query).await
    }
}
