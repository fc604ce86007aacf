//! Domain error types.

mod conversion_error;
mod fetch_error;
mod override_error;
mod plugin_error;

pub use conversion_error::ConversionError;
pub use fetch_error::FetchError;
pub use override_error::OverrideError;
pub use plugin_error::{PluginError, SinkError};
