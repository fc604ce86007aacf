//! Invocation-level error types.

use thiserror::Error;

/// Error delivering a message to the chat.
#[derive(Debug, Error)]
#[error("failed to deliver message: {0}")]
pub struct SinkError(pub String);

/// Failures that escape a whole command invocation.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The chat host refused an outbound message.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// The invocation panicked.
    #[error("invocation panicked: {0}")]
    Panicked(String),
}
