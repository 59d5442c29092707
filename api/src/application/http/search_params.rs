use serde_json::{Map, Value};

/// Query parameters decoded into a nested JSON tree.
///
/// Handles formats like:
/// - keyword=value
/// - type[pdf]=true
/// - metadata[data][field]=value
///
/// Every leaf is a string; typing happens when the tree is deserialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedParams {
    root: Map<String, Value>,
}

impl NestedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Parse a raw, still percent-encoded query string.
    pub fn from_query_string(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        Ok(Self::from_pairs(pairs))
    }

    /// Later pairs overwrite earlier ones; keys with unbalanced brackets are skipped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::new();

        for (key, value) in pairs {
            if let Some(path) = key_path(&key) {
                insert(&mut params.root, &path, value);
            }
        }

        params
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}

/// Split `a[b][c]` into `["a", "b", "c"]`.
fn key_path(key: &str) -> Option<Vec<&str>> {
    let (head, mut rest) = match key.find('[') {
        Some(start) => (&key[..start], &key[start..]),
        None => (key, ""),
    };

    if head.is_empty() {
        return None;
    }

    let mut path = vec![head];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let end = inner.find(']')?;
        path.push(&inner[..end]);
        rest = &inner[end + 1..];
    }

    Some(path)
}

fn insert(node: &mut Map<String, Value>, path: &[&str], value: String) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        node.insert(first.to_string(), Value::String(value));
        return;
    }

    let child = node
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !child.is_object() {
        *child = Value::Object(Map::new());
    }
    if let Value::Object(map) = child {
        insert(map, rest, value);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_flat_keys() {
        let params = NestedParams::from_query_string("keyword=annual%20report&owner=Jane+Doe").unwrap();

        assert_eq!(
            params.into_value(),
            json!({ "keyword": "annual report", "owner": "Jane Doe" })
        );
    }

    #[test]
    fn test_bracket_keys_nest() {
        let params = NestedParams::from_query_string(
            "type%5Bpdf%5D=true&type[folder]=false&metadata[templateKey]=contract&metadata[data][status]=active",
        )
        .unwrap();

        assert_eq!(
            params.into_value(),
            json!({
                "type": { "pdf": "true", "folder": "false" },
                "metadata": { "templateKey": "contract", "data": { "status": "active" } }
            })
        );
    }

    #[test]
    fn test_malformed_keys_are_skipped() {
        let params = NestedParams::from_query_string("type[pdf=true&[x]=1&keyword=a").unwrap();

        assert_eq!(params.into_value(), json!({ "keyword": "a" }));
    }

    #[test]
    fn test_nested_key_replaces_scalar() {
        let params = NestedParams::from_pairs([
            ("metadata".to_string(), "x".to_string()),
            ("metadata[scope]".to_string(), "global".to_string()),
        ]);

        assert_eq!(params.into_value(), json!({ "metadata": { "scope": "global" } }));
    }

    #[test]
    fn test_empty_query() {
        assert!(NestedParams::from_query_string("").unwrap().is_empty());
    }
}
