//! Attachment resolution error types.

use thiserror::Error;

/// Failure to turn an image reference into bytes.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Reference has no URL or file to resolve.
    #[error("reference carries neither url nor file")]
    MissingLocator,

    /// Resolution produced no bytes.
    #[error("resolved payload is empty")]
    Empty,

    /// Scheme the resolver cannot handle.
    #[error("unsupported reference: {0}")]
    Unsupported(String),

    /// Download failed.
    #[error("network error: {0}")]
    Network(String),

    /// Local file read failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Inline payload was not valid base64.
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}
