//! Translation of a [`FilterSpec`] into upstream search parameters.
//!
//! The translation is an ordered pipeline of pure steps folding over a
//! [`SearchQuery`] accumulator. Step order matters: the extension step only
//! fills `query` when the keyword step left it empty, owner and tags append to
//! whatever is there, and the wildcard fallback runs last so that the result
//! always carries either `query` or `mdfilters`.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::domain::search::value_objects::{
    FilterSpec, ItemKind, SearchQuery, TranslationContext,
};

pub const SEARCH_FIELDS: &str =
    "id,name,size,modified_at,type,owned_by,shared_link,item_status,tags,path_collection";
pub const SEARCH_LIMIT: u32 = 200;
pub const SEARCH_OFFSET: u32 = 0;
pub const ROOT_FOLDER_ID: &str = "0";
pub const WILDCARD_QUERY: &str = "*";
pub const DEFAULT_METADATA_SCOPE: &str = "enterprise";

type Step = fn(&mut SearchQuery, &FilterSpec, &TranslationContext);

const PIPELINE: [Step; 10] = [
    apply_keyword,
    apply_extensions,
    apply_item_type,
    apply_date_range,
    apply_size_range,
    apply_owner,
    apply_tags,
    apply_metadata_filters,
    apply_wildcard_fallback,
    apply_paging,
];

/// Same filter and same `now` always give the same query.
pub fn translate(filter: &FilterSpec, ctx: &TranslationContext) -> SearchQuery {
    PIPELINE
        .iter()
        .fold(base_query(), |mut query, step| {
            step(&mut query, filter, ctx);
            query
        })
}

fn base_query() -> SearchQuery {
    SearchQuery {
        fields: SEARCH_FIELDS.to_string(),
        query: None,
        file_extensions: None,
        item_type: None,
        updated_at_range: None,
        size_range: None,
        mdfilters: None,
        limit: SEARCH_LIMIT,
        offset: SEARCH_OFFSET,
        ancestor_folder_ids: ROOT_FOLDER_ID.to_string(),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn append_term(query: &mut SearchQuery, term: String) {
    query.query = Some(match query.query.take() {
        Some(existing) => format!("{existing} {term}"),
        None => term,
    });
}

fn apply_keyword(query: &mut SearchQuery, filter: &FilterSpec, _: &TranslationContext) {
    if let Some(keyword) = non_blank(&filter.keyword) {
        query.query = Some(keyword.to_string());
    }
}

fn apply_extensions(query: &mut SearchQuery, filter: &FilterSpec, _: &TranslationContext) {
    let mut extensions: Vec<&str> = Vec::new();
    for group in filter.type_flags.selected_groups() {
        for ext in group.extensions() {
            if !extensions.contains(ext) {
                extensions.push(ext);
            }
        }
    }

    if extensions.is_empty() {
        return;
    }

    query.file_extensions = Some(extensions.join(","));
    if query.query.is_none() {
        query.query = Some(extensions.join(" OR "));
    }
}

fn apply_item_type(query: &mut SearchQuery, filter: &FilterSpec, _: &TranslationContext) {
    let flags = &filter.type_flags;
    let folder = flags.folder;
    let file = flags.file || flags.any_group_selected();

    query.item_type = match (folder, file) {
        (true, false) => Some(ItemKind::Folder),
        (false, true) => Some(ItemKind::File),
        _ => None,
    };
}

fn apply_date_range(query: &mut SearchQuery, filter: &FilterSpec, ctx: &TranslationContext) {
    if let Some(lookback) = filter.date_bucket.lookback() {
        let from = ctx.now - lookback;
        query.updated_at_range = Some(format!(
            "{},{}",
            from.to_rfc3339_opts(SecondsFormat::Millis, true),
            ctx.now.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
    }
}

fn apply_size_range(query: &mut SearchQuery, filter: &FilterSpec, _: &TranslationContext) {
    if let Some((lower, upper)) = filter.size_bucket.bounds() {
        let bound = |b: Option<u64>| b.map(|v| v.to_string()).unwrap_or_default();
        query.size_range = Some(format!("{},{}", bound(lower), bound(upper)));
    }
}

fn apply_owner(query: &mut SearchQuery, filter: &FilterSpec, _: &TranslationContext) {
    if let Some(owner) = non_blank(&filter.owner) {
        append_term(query, format!("\"{}\"", owner));
    }
}

fn apply_tags(query: &mut SearchQuery, filter: &FilterSpec, _: &TranslationContext) {
    if let Some(tags) = non_blank(&filter.tags) {
        append_term(query, tags.to_string());
    }
}

#[derive(Serialize)]
struct MdFilter<'a> {
    scope: String,
    #[serde(rename = "templateKey")]
    template_key: &'a str,
    filters: std::collections::BTreeMap<String, serde_json::Value>,
}

fn apply_metadata_filters(query: &mut SearchQuery, filter: &FilterSpec, ctx: &TranslationContext) {
    let Some(metadata) = &filter.metadata_filter else {
        return;
    };
    let Some(template_key) = non_blank(&metadata.template_key) else {
        return;
    };

    let filters = metadata.meaningful_values();
    if filters.is_empty() {
        return;
    }

    let declared = non_blank(&metadata.template_scope).unwrap_or(DEFAULT_METADATA_SCOPE);
    let scope = match (declared, ctx.enterprise_id.as_deref()) {
        (DEFAULT_METADATA_SCOPE, Some(id)) => format!("enterprise_{id}"),
        (scope, _) => scope.to_string(),
    };

    let mdfilters = [MdFilter {
        scope,
        template_key,
        filters,
    }];

    // Serializing strings and JSON values into a Vec cannot fail.
    if let Ok(json) = serde_json::to_string(&mdfilters) {
        query.mdfilters = Some(json);
    }
}

fn apply_wildcard_fallback(query: &mut SearchQuery, _: &FilterSpec, _: &TranslationContext) {
    if query.query.is_none() && query.mdfilters.is_none() {
        query.query = Some(WILDCARD_QUERY.to_string());
    }
}

fn apply_paging(query: &mut SearchQuery, _: &FilterSpec, _: &TranslationContext) {
    query.limit = SEARCH_LIMIT;
    query.offset = SEARCH_OFFSET;
    query.ancestor_folder_ids = ROOT_FOLDER_ID.to_string();
}
