//! Plugin configuration.

/// Command line arguments.
pub mod args;
/// Configuration file model and validation.
pub mod plugin_config;
/// Configuration file loading.
pub mod storage;

pub use args::CliArgs;
pub use plugin_config::{DefaultParams, LogLevel, PLACEHOLDER_API_URL, PluginConfig};
pub use storage::{ConfigError, ConfigStore};
