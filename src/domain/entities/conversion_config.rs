//! Conversion option mapping sent alongside each image.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Option name to value mapping controlling the remote stylization.
///
/// Always a JSON object. Merging is shallow: an override key replaces the
/// default value wholesale, nested objects included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionConfig(Map<String, Value>);

impl ConversionConfig {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns a new mapping with `overrides` applied on top of `self`.
    #[must_use]
    pub fn merged_with(&self, overrides: &Self) -> Self {
        let mut merged = self.0.clone();
        for (key, value) in &overrides.0 {
            merged.insert(key.clone(), value.clone());
        }
        Self(merged)
    }

    /// Looks up an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the mapping as compact JSON text.
    #[must_use]
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// Borrows the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ConversionConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for ConversionConfig {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> ConversionConfig {
        ConversionConfig::try_from(value).unwrap()
    }

    #[test]
    fn test_override_wins_on_conflict() {
        let defaults = config(json!({"a": 1, "b": 2}));
        let merged = defaults.merged_with(&config(json!({"b": 3})));

        assert_eq!(merged, config(json!({"a": 1, "b": 3})));
        assert_eq!(defaults, config(json!({"a": 1, "b": 2})));
    }

    #[test]
    fn test_nested_objects_are_replaced_not_merged() {
        let defaults = config(json!({"style": {"tone": "warm", "grain": true}}));
        let merged = defaults.merged_with(&config(json!({"style": {"tone": "cold"}})));

        assert_eq!(merged.get("style"), Some(&json!({"tone": "cold"})));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(ConversionConfig::try_from(json!([1, 2])).is_err());
        assert!(ConversionConfig::try_from(json!("text")).is_err());
    }

    #[test]
    fn test_to_json_roundtrips_through_value() {
        let options = config(json!({"watermark": true, "hajimei": false}));
        let parsed: Value = serde_json::from_str(&options.to_json()).unwrap();
        assert_eq!(parsed, json!({"watermark": true, "hajimei": false}));
    }
}
