//! User supplied option override errors.

use thiserror::Error;

/// Reasons an override string is rejected.
#[derive(Debug, Error)]
pub enum OverrideError {
    /// Not valid JSON at all.
    #[error("override is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Valid JSON, but not an object.
    #[error("override must be a JSON object, got {kind}")]
    NotAnObject {
        /// JSON type that was supplied instead.
        kind: &'static str,
    },
}
