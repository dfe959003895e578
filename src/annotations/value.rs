//! Annotation values and the ordered annotation map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single annotation value.
///
/// Values are JSON-like; anything that does not parse as JSON is kept as a
/// plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<AnnotationValue>),
    Map(IndexMap<String, AnnotationValue>),
}

impl AnnotationValue {
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::String("null".to_string()),
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Ordered key/value annotations of one declaration, file or block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(IndexMap<String, AnnotationValue>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a value, replacing any previous value for the key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: AnnotationValue) {
        self.0.insert(key.into(), value);
    }

    /// Insert a value, turning a repeated key into a list in insertion order.
    pub fn accumulate(&mut self, key: impl Into<String>, value: AnnotationValue) {
        match self.0.entry(key.into()) {
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(value);
            }
            indexmap::map::Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                match existing {
                    AnnotationValue::List(items) => items.push(value),
                    other => {
                        let first = std::mem::replace(other, AnnotationValue::Bool(false));
                        *other = AnnotationValue::List(vec![first, value]);
                    }
                }
            }
        }
    }

    /// Accumulate every entry of `other` into `self`.
    pub fn accumulate_all(&mut self, other: Annotations) {
        for (key, value) in other.0 {
            self.accumulate(key, value);
        }
    }

    /// Add entries of `lower` whose keys are missing here.
    pub fn fill_from(&mut self, lower: &Annotations) {
        for (key, value) in &lower.0 {
            if !self.0.contains_key(key) {
                self.0.insert(key.clone(), value.clone());
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnnotationValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, AnnotationValue)> for Annotations {
    fn from_iter<I: IntoIterator<Item = (String, AnnotationValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_builds_list() {
        let mut annotations = Annotations::new();
        annotations.accumulate("tag", "a".into());
        annotations.accumulate("tag", "b".into());
        annotations.accumulate("tag", "c".into());
        assert_eq!(
            annotations.get("tag"),
            Some(&AnnotationValue::List(vec!["a".into(), "b".into(), "c".into()]))
        );
    }

    #[test]
    fn test_fill_from_keeps_existing() {
        let mut high: Annotations = [("k".to_string(), AnnotationValue::Integer(2))]
            .into_iter()
            .collect();
        let low: Annotations = [
            ("k".to_string(), AnnotationValue::Integer(1)),
            ("other".to_string(), AnnotationValue::Bool(true)),
        ]
        .into_iter()
        .collect();
        high.fill_from(&low);
        assert_eq!(high.get("k"), Some(&AnnotationValue::Integer(2)));
        assert_eq!(high.get("other"), Some(&AnnotationValue::Bool(true)));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let annotations: Annotations = [
            ("skip".to_string(), AnnotationValue::Bool(true)),
            ("name".to_string(), AnnotationValue::String("x".into())),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&annotations).unwrap();
        assert_eq!(json, r#"{"skip":true,"name":"x"}"#);
        let back: Annotations = serde_json::from_str(&json).unwrap();
        assert_eq!(back, annotations);
    }
}
