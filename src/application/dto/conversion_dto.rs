//! Conversion request and settings DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ConversionConfig, MessageSegment};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// What to do when a batch holds more images than allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Process the first `max_images` and drop the rest.
    #[default]
    Truncate,
    /// Process nothing.
    Reject,
}

impl std::fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truncate => write!(f, "truncate"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Validated plugin settings, read-only after startup.
#[derive(Debug, Clone)]
pub struct PluginSettings {
    /// Conversion endpoint. `None` disables the plugin.
    pub endpoint: Option<String>,
    /// Maximum images per invocation.
    pub max_images: usize,
    /// Maximum upload size in megabytes.
    pub max_file_size_mb: u64,
    /// Options sent when the user supplies none.
    pub default_options: ConversionConfig,
    /// Behavior when `max_images` is exceeded.
    pub overflow_policy: OverflowPolicy,
}

impl PluginSettings {
    /// Creates enabled settings with default limits.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            ..Self::default()
        }
    }

    /// Returns whether an endpoint is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Maximum upload size in bytes.
    #[must_use]
    pub fn max_file_size_bytes(&self) -> usize {
        usize::try_from(self.max_file_size_mb.saturating_mul(BYTES_PER_MB)).unwrap_or(usize::MAX)
    }
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            max_images: 5,
            max_file_size_mb: 3,
            default_options: ConversionConfig::new(),
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

/// One command invocation.
#[derive(Debug, Clone, Default)]
pub struct ConversionRequest {
    /// Content of the triggering message.
    pub segments: Vec<MessageSegment>,
    /// Raw option override following the command, if any.
    pub options: Option<String>,
}

impl ConversionRequest {
    /// Creates request without options.
    #[must_use]
    pub const fn new(segments: Vec<MessageSegment>) -> Self {
        Self {
            segments,
            options: None,
        }
    }

    /// Sets the raw option override.
    #[must_use]
    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }
}
