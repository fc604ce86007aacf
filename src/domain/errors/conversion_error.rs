//! Remote conversion error types.

use thiserror::Error;

/// Conversion failure variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// The request did not complete within the timeout.
    #[error("conversion request timed out")]
    Timeout,

    /// Connection, protocol or body read failure.
    #[error("conversion request failed: {0}")]
    Transport(String),

    /// The service answered with a status other than 200.
    #[error("conversion service returned HTTP {status}: {body}")]
    HttpStatus {
        /// Response status code.
        status: u16,
        /// Response body text.
        body: String,
    },
}

impl ConversionError {
    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}
