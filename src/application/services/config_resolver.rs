//! Merges per-invocation option overrides into the plugin defaults.

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::entities::ConversionConfig;
use crate::domain::errors::OverrideError;

/// Resolves the options for one invocation.
///
/// A missing or blank override yields the defaults. Otherwise the override must
/// parse as a JSON object; its keys replace the defaults' keys shallowly.
/// `defaults` is never modified.
///
/// # Errors
/// Returns error if the override is not JSON or not a JSON object.
pub fn resolve_config(
    defaults: &ConversionConfig,
    raw_override: Option<&str>,
) -> Result<ConversionConfig, OverrideError> {
    let Some(raw) = raw_override.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(defaults.clone());
    };

    let overrides = parse_override(raw).inspect_err(|e| {
        warn!(input = raw, error = %e, "Failed to parse user options");
    })?;

    debug!(keys = overrides.len(), "Applying user options");
    Ok(defaults.merged_with(&overrides))
}

fn parse_override(raw: &str) -> Result<ConversionConfig, OverrideError> {
    let value: Value = serde_json::from_str(raw)?;
    ConversionConfig::try_from(value).map_err(|other| OverrideError::NotAnObject {
        kind: json_kind(&other),
    })
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
