use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

pub const MEGABYTE: u64 = 1_048_576;

/// Filter flags selectable in the search UI.
///
/// `folder` and `file` pick the container type; every other flag selects an
/// [`ExtensionGroup`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeFlags {
    pub folder: bool,
    pub file: bool,
    pub boxnote: bool,
    pub boxcanvas: bool,
    pub pdf: bool,
    pub document: bool,
    pub spreadsheet: bool,
    pub presentation: bool,
    pub image: bool,
    pub audio: bool,
    pub video: bool,
    pub drawing: bool,
    #[serde(rename = "threeD")]
    pub three_d: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionGroup {
    Boxnote,
    Boxcanvas,
    Pdf,
    Document,
    Spreadsheet,
    Presentation,
    Image,
    Audio,
    Video,
    Drawing,
    ThreeD,
}

impl ExtensionGroup {
    /// Every group, in the order their extensions are emitted.
    pub const ALL: [ExtensionGroup; 11] = [
        ExtensionGroup::Boxnote,
        ExtensionGroup::Boxcanvas,
        ExtensionGroup::Pdf,
        ExtensionGroup::Document,
        ExtensionGroup::Spreadsheet,
        ExtensionGroup::Presentation,
        ExtensionGroup::Image,
        ExtensionGroup::Audio,
        ExtensionGroup::Video,
        ExtensionGroup::Drawing,
        ExtensionGroup::ThreeD,
    ];

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ExtensionGroup::Boxnote => &["boxnote"],
            ExtensionGroup::Boxcanvas => &["boxcanvas"],
            ExtensionGroup::Pdf => &["pdf"],
            ExtensionGroup::Document => &["doc", "docx", "txt", "rtf", "odt", "gdoc"],
            ExtensionGroup::Spreadsheet => &["xls", "xlsx", "csv", "ods", "gsheet"],
            ExtensionGroup::Presentation => &["ppt", "pptx", "odp", "gslide"],
            ExtensionGroup::Image => &["jpg", "jpeg", "png", "gif", "bmp", "svg", "tiff", "webp"],
            ExtensionGroup::Audio => &["mp3", "wav", "aac", "m4a", "ogg", "wma"],
            ExtensionGroup::Video => &["mp4", "mov", "avi", "wmv", "mkv", "webm", "flv"],
            ExtensionGroup::Drawing => &["ai", "psd", "eps", "indd"],
            ExtensionGroup::ThreeD => &["obj", "stl", "fbx", "dae", "3ds"],
        }
    }

    pub fn is_selected(self, flags: &TypeFlags) -> bool {
        match self {
            ExtensionGroup::Boxnote => flags.boxnote,
            ExtensionGroup::Boxcanvas => flags.boxcanvas,
            ExtensionGroup::Pdf => flags.pdf,
            ExtensionGroup::Document => flags.document,
            ExtensionGroup::Spreadsheet => flags.spreadsheet,
            ExtensionGroup::Presentation => flags.presentation,
            ExtensionGroup::Image => flags.image,
            ExtensionGroup::Audio => flags.audio,
            ExtensionGroup::Video => flags.video,
            ExtensionGroup::Drawing => flags.drawing,
            ExtensionGroup::ThreeD => flags.three_d,
        }
    }
}

impl TypeFlags {
    pub fn selected_groups(&self) -> impl Iterator<Item = ExtensionGroup> + '_ {
        ExtensionGroup::ALL
            .into_iter()
            .filter(|group| group.is_selected(self))
    }

    pub fn any_group_selected(&self) -> bool {
        self.selected_groups().next().is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DateBucket {
    #[default]
    Any,
    Yesterday,
    LastWeek,
    LastMonth,
    LastYear,
}

impl DateBucket {
    /// How far back the range starts. `None` for `Any`.
    ///
    /// `Yesterday` deliberately reaches back two days.
    pub fn lookback(self) -> Option<TimeDelta> {
        match self {
            DateBucket::Any => None,
            DateBucket::Yesterday => Some(TimeDelta::days(2)),
            DateBucket::LastWeek => Some(TimeDelta::days(7)),
            DateBucket::LastMonth => Some(TimeDelta::days(30)),
            DateBucket::LastYear => Some(TimeDelta::days(365)),
        }
    }
}

impl FromStr for DateBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "any" => Ok(DateBucket::Any),
            "yesterday" => Ok(DateBucket::Yesterday),
            "lastWeek" => Ok(DateBucket::LastWeek),
            "lastMonth" => Ok(DateBucket::LastMonth),
            "lastYear" => Ok(DateBucket::LastYear),
            other => Err(CoreError::InvalidFilter(format!(
                "unknown date bucket '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SizeBucket {
    #[default]
    Any,
    Small,
    Medium,
    Large,
    Huge,
    Gigantic,
    Massive,
}

impl SizeBucket {
    /// Byte bounds as `(lower, upper)`; an open side is `None`.
    pub fn bounds(self) -> Option<(Option<u64>, Option<u64>)> {
        match self {
            SizeBucket::Any => None,
            SizeBucket::Small => Some((None, Some(MEGABYTE))),
            SizeBucket::Medium => Some((Some(MEGABYTE), Some(5 * MEGABYTE))),
            SizeBucket::Large => Some((Some(5 * MEGABYTE), Some(25 * MEGABYTE))),
            SizeBucket::Huge => Some((Some(25 * MEGABYTE), Some(100 * MEGABYTE))),
            SizeBucket::Gigantic => Some((Some(100 * MEGABYTE), Some(1024 * MEGABYTE))),
            SizeBucket::Massive => Some((Some(1024 * MEGABYTE), None)),
        }
    }
}

impl FromStr for SizeBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "any" => Ok(SizeBucket::Any),
            "small" => Ok(SizeBucket::Small),
            "medium" => Ok(SizeBucket::Medium),
            "large" => Ok(SizeBucket::Large),
            "huge" => Ok(SizeBucket::Huge),
            "gigantic" => Ok(SizeBucket::Gigantic),
            "massive" => Ok(SizeBucket::Massive),
            other => Err(CoreError::InvalidFilter(format!(
                "unknown size bucket '{other}'"
            ))),
        }
    }
}

/// Restricts results to items carrying a metadata instance of a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct MetadataFilter {
    #[serde(alias = "scope")]
    pub template_scope: Option<String>,
    #[serde(alias = "templateKey")]
    pub template_key: Option<String>,
    #[serde(alias = "data")]
    #[schema(value_type = Object)]
    pub field_values: BTreeMap<String, serde_json::Value>,
}

impl MetadataFilter {
    /// Field values worth sending upstream: not null, not `"any"`, not empty.
    pub fn meaningful_values(&self) -> BTreeMap<String, serde_json::Value> {
        self.field_values
            .iter()
            .filter(|(_, value)| match value {
                serde_json::Value::Null => false,
                serde_json::Value::String(s) => !s.is_empty() && s != "any",
                _ => true,
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Everything the user picked in the search form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FilterSpec {
    pub keyword: Option<String>,
    #[serde(alias = "type")]
    pub type_flags: TypeFlags,
    #[serde(alias = "date")]
    pub date_bucket: DateBucket,
    #[serde(alias = "size")]
    pub size_bucket: SizeBucket,
    pub owner: Option<String>,
    pub tags: Option<String>,
    #[serde(alias = "metadata")]
    pub metadata_filter: Option<MetadataFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::File => f.write_str("file"),
            ItemKind::Folder => f.write_str("folder"),
        }
    }
}

/// Query parameters of one upstream search call.
///
/// Serializes straight into the query string; unset parameters are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub fields: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extensions: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mdfilters: Option<String>,
    pub limit: u32,
    pub offset: u32,
    pub ancestor_folder_ids: String,
}

/// Inputs to translation that do not come from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationContext {
    pub now: DateTime<Utc>,
    pub enterprise_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_spec_accepts_ui_field_names() {
        let raw = json!({
            "keyword": "budget",
            "type": { "pdf": true, "threeD": true },
            "date": "lastWeek",
            "size": "large",
            "metadata": {
                "templateKey": "contract",
                "scope": "enterprise",
                "data": { "status": "signed" }
            }
        });

        let filter: FilterSpec = serde_json::from_value(raw).unwrap();

        assert!(filter.type_flags.pdf);
        assert!(filter.type_flags.three_d);
        assert_eq!(filter.date_bucket, DateBucket::LastWeek);
        assert_eq!(filter.size_bucket, SizeBucket::Large);
        let metadata = filter.metadata_filter.unwrap();
        assert_eq!(metadata.template_key.as_deref(), Some("contract"));
        assert_eq!(metadata.field_values["status"], json!("signed"));
    }

    #[test]
    fn test_unknown_buckets_are_rejected() {
        assert!(matches!(
            "lastDecade".parse::<DateBucket>(),
            Err(CoreError::InvalidFilter(_))
        ));
        assert!(matches!(
            "tiny".parse::<SizeBucket>(),
            Err(CoreError::InvalidFilter(_))
        ));
        assert_eq!("any".parse::<SizeBucket>().unwrap(), SizeBucket::Any);
    }

    #[test]
    fn test_meaningful_values_drop_placeholders_only() {
        let filter = MetadataFilter {
            template_scope: None,
            template_key: Some("contract".to_string()),
            field_values: BTreeMap::from([
                ("a".to_string(), json!("any")),
                ("b".to_string(), json!("")),
                ("c".to_string(), serde_json::Value::Null),
                ("d".to_string(), json!("signed")),
                ("e".to_string(), json!(0)),
            ]),
        };

        let values = filter.meaningful_values();

        assert_eq!(values.keys().collect::<Vec<_>>(), vec!["d", "e"]);
    }

    #[test]
    fn test_selected_groups_follow_declaration_order() {
        let flags = TypeFlags {
            three_d: true,
            boxnote: true,
            image: true,
            ..Default::default()
        };

        let groups: Vec<_> = flags.selected_groups().collect();

        assert_eq!(
            groups,
            vec![
                ExtensionGroup::Boxnote,
                ExtensionGroup::Image,
                ExtensionGroup::ThreeD
            ]
        );
    }
}
