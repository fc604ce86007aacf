//! Plugin configuration.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::application::dto::{OverflowPolicy, PluginSettings};
use crate::domain::entities::ConversionConfig;

const APP_NAME: &str = "onelast";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "timetetng";

/// Value shipped in fresh config files; treated as unset.
pub const PLACEHOLDER_API_URL: &str = "YOUR_VERCEL_API_URL_HERE";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Default conversion options as written in the config file.
///
/// Accepts a native table or a JSON object encoded as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultParams {
    /// Native table.
    Table(Map<String, Value>),
    /// JSON text, parsed once at startup.
    Json(String),
    /// Anything else; ignored.
    Other(Value),
}

impl Default for DefaultParams {
    fn default() -> Self {
        Self::Table(Map::new())
    }
}

impl DefaultParams {
    /// Resolves to an option mapping, falling back to empty with a logged warning.
    #[must_use]
    pub fn resolve(&self) -> ConversionConfig {
        match self {
            Self::Table(map) => ConversionConfig::from(map.clone()),
            Self::Json(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => ConversionConfig::from(map),
                Ok(other) => {
                    warn!(config = %text, kind = ?other, "default_params is not a JSON object, using empty options");
                    ConversionConfig::new()
                }
                Err(e) => {
                    error!(config = %text, error = %e, "Failed to parse default_params, using empty options");
                    ConversionConfig::new()
                }
            },
            Self::Other(value) => {
                warn!(value = %value, "Unknown default_params type (expected table or string), using empty options");
                ConversionConfig::new()
            }
        }
    }
}

/// Plugin configuration loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Conversion service endpoint.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Maximum images per invocation.
    #[serde(default = "default_max_images")]
    pub max_images: usize,

    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Behavior when more than `max_images` images arrive.
    #[serde(default)]
    pub overflow_policy: OverflowPolicy,

    /// Options sent with every image unless overridden.
    ///
    /// Kept last so it serializes after the plain keys.
    #[serde(default)]
    pub default_params: DefaultParams,
}

const fn default_max_images() -> usize {
    5
}

const fn default_max_file_size_mb() -> u64 {
    3
}

use super::args::CliArgs;

impl PluginConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = &args.api_url {
            self.api_url = Some(api_url.clone());
        }
        if let Some(max_images) = args.max_images {
            self.max_images = max_images;
        }
        if let Some(max_file_size_mb) = args.max_file_size_mb {
            self.max_file_size_mb = max_file_size_mb;
        }
    }

    /// Returns the endpoint if it is set to something other than the placeholder.
    #[must_use]
    pub fn validated_api_url(&self) -> Option<&str> {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && !url.contains(PLACEHOLDER_API_URL))
    }

    /// Validates the configuration into runtime settings.
    ///
    /// A missing or placeholder endpoint disables the plugin instead of failing.
    #[must_use]
    pub fn to_settings(&self) -> PluginSettings {
        let endpoint = self.validated_api_url().map(String::from);
        if endpoint.is_none() {
            error!("API URL is not configured, every invocation will be refused");
        }

        let max_images = if self.max_images == 0 {
            warn!("max_images is 0, using 1");
            1
        } else {
            self.max_images
        };

        PluginSettings {
            endpoint,
            max_images,
            max_file_size_mb: self.max_file_size_mb,
            default_options: self.default_params.resolve(),
            overflow_policy: self.overflow_policy,
        }
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            api_url: Some(PLACEHOLDER_API_URL.to_string()),
            max_images: default_max_images(),
            max_file_size_mb: default_max_file_size_mb(),
            overflow_policy: OverflowPolicy::default(),
            default_params: DefaultParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_table_params() {
        let toml_content = r#"
            api_url = "https://onelast.example/api/convert"
            max_images = 3

            [default_params]
            watermark = true
            hajimei = false
        "#;

        let config: PluginConfig = toml::from_str(toml_content).expect("Failed to parse config");
        let settings = config.to_settings();

        assert_eq!(
            settings.endpoint.as_deref(),
            Some("https://onelast.example/api/convert")
        );
        assert_eq!(settings.max_images, 3);
        assert_eq!(settings.max_file_size_mb, 3);
        assert_eq!(settings.default_options.get("watermark"), Some(&json!(true)));
        assert_eq!(settings.overflow_policy, OverflowPolicy::Truncate);
    }

    #[test]
    fn test_parse_json_string_params() {
        let toml_content = r#"
            api_url = "https://onelast.example"
            default_params = '{"watermark": true, "shadeLimit": 0.4}'
            overflow_policy = "reject"
        "#;

        let config: PluginConfig = toml::from_str(toml_content).expect("Failed to parse config");
        let settings = config.to_settings();

        assert_eq!(settings.default_options.len(), 2);
        assert_eq!(settings.default_options.get("shadeLimit"), Some(&json!(0.4)));
        assert_eq!(settings.overflow_policy, OverflowPolicy::Reject);
    }

    #[test]
    fn test_malformed_json_params_fall_back_to_empty() {
        let params = DefaultParams::Json("{not json".to_string());
        assert!(params.resolve().is_empty());
    }

    #[test]
    fn test_unknown_params_type_falls_back_to_empty() {
        let config: PluginConfig = toml::from_str("default_params = 42").unwrap();
        assert!(config.default_params.resolve().is_empty());
    }

    #[test]
    fn test_placeholder_url_disables_plugin() {
        let config = PluginConfig::default();
        assert!(config.validated_api_url().is_none());
        assert!(!config.to_settings().is_enabled());
    }

    #[test]
    fn test_blank_url_disables_plugin() {
        let config: PluginConfig = toml::from_str("api_url = \"  \"").unwrap();
        assert!(!config.to_settings().is_enabled());
    }

    #[test]
    fn test_missing_url_disables_plugin() {
        let config: PluginConfig = toml::from_str("max_images = 2").unwrap();
        assert!(!config.to_settings().is_enabled());
    }
}
