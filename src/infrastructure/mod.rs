//! Infrastructure layer with external service adapters.

/// Attachment resolution.
pub mod attachments;
/// Plugin configuration.
pub mod config;
/// Conversion service client.
pub mod conversion;

pub use attachments::LocalAttachmentResolver;
pub use config::{CliArgs, ConfigStore, LogLevel, PluginConfig};
pub use conversion::HttpConversionClient;
