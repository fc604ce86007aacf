//! Port for delivering messages back to the chat.

use async_trait::async_trait;

use crate::domain::entities::OutboundMessage;
use crate::domain::errors::SinkError;

/// Receives outbound messages as soon as they are produced.
#[async_trait]
pub trait MessageSinkPort: Send + Sync {
    /// Delivers one message.
    async fn send(&self, message: OutboundMessage) -> Result<(), SinkError>;
}
