use std::collections::BTreeMap;

use boxportal_core::domain::{
    common::entities::app_errors::CoreError,
    search::value_objects::{DateBucket, FilterSpec, MetadataFilter, SizeBucket, TypeFlags},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Search form as sent by the portal UI, either as a JSON body or decoded
/// from the nested query string.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SearchRequest {
    pub keyword: Option<String>,
    /// Type flags; `"true"` and `"false"` strings are accepted as booleans.
    #[serde(rename = "type", alias = "typeFlags")]
    #[schema(value_type = Object)]
    pub type_flags: BTreeMap<String, Value>,
    #[serde(alias = "dateBucket")]
    pub date: Option<String>,
    #[serde(alias = "sizeBucket")]
    pub size: Option<String>,
    pub owner: Option<String>,
    pub tags: Option<String>,
    #[serde(alias = "metadataFilter")]
    pub metadata: Option<MetadataFilter>,
}

fn flag(name: &str, value: &Value) -> Result<bool, CoreError> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::Null => Ok(false),
        Value::String(s) if s == "true" => Ok(true),
        Value::String(s) if s == "false" || s.is_empty() => Ok(false),
        other => Err(CoreError::InvalidFilter(format!(
            "type flag '{name}' must be a boolean, got {other}"
        ))),
    }
}

impl TryFrom<SearchRequest> for FilterSpec {
    type Error = CoreError;

    fn try_from(request: SearchRequest) -> Result<Self, Self::Error> {
        let mut flags = Map::new();
        for (name, value) in &request.type_flags {
            flags.insert(name.clone(), Value::Bool(flag(name, value)?));
        }
        let type_flags: TypeFlags = serde_json::from_value(Value::Object(flags))
            .map_err(|e| CoreError::InvalidFilter(format!("invalid type flags: {e}")))?;

        Ok(FilterSpec {
            keyword: request.keyword,
            type_flags,
            date_bucket: request.date.as_deref().unwrap_or_default().parse::<DateBucket>()?,
            size_bucket: request.size.as_deref().unwrap_or_default().parse::<SizeBucket>()?,
            owner: request.owner,
            tags: request.tags,
            metadata_filter: request.metadata,
        })
    }
}
