use std::collections::HashMap;

use serde_json::Value;

/// One untyped record as returned by the bid-announcement API.
///
/// The upstream system runs several API generations side by side and they do
/// not agree on field names or value types (strings vs. bare numbers, two
/// different agency-name fields), so instead of a fixed schema this is a
/// string-keyed map with typed getters and explicit fallback chains.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    /// Build from one JSON object. Scalar values are flattened to their
    /// string form; nested values and nulls are dropped.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut fields = HashMap::new();
        for (key, value) in object {
            match value {
                Value::String(s) => {
                    fields.insert(key.clone(), s.clone());
                }
                Value::Number(n) => {
                    fields.insert(key.clone(), n.to_string());
                }
                Value::Bool(b) => {
                    fields.insert(key.clone(), b.to_string());
                }
                _ => {}
            }
        }
        Some(Self { fields })
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            fields: pairs.into_iter().collect(),
        }
    }

    /// The field value, if present and non-empty.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// First non-empty value along a fallback chain of field names.
    pub fn text_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// The field parsed as an integer; absent or malformed values yield
    /// `None` (callers treat that as "undisclosed").
    pub fn int(&self, key: &str) -> Option<i64> {
        self.text(key)?.trim().parse().ok()
    }
}
