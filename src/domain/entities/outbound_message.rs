//! Messages emitted back to the chat.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const BASE64_SCHEME: &str = "base64://";

/// A single outbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Status or error text.
    Plain(String),
    /// Generated image, carried inline as base64.
    Image {
        /// Base64 encoded image bytes.
        base64: String,
    },
}

impl OutboundMessage {
    /// Creates a text message.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Creates an image message from raw bytes.
    #[must_use]
    pub fn image(data: &[u8]) -> Self {
        Self::Image {
            base64: STANDARD.encode(data),
        }
    }

    /// Returns the text if this is a plain message.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text),
            Self::Image { .. } => None,
        }
    }

    /// Returns the `base64://` file reference if this is an image message.
    #[must_use]
    pub fn file_uri(&self) -> Option<String> {
        match self {
            Self::Image { base64 } => Some(format!("{BASE64_SCHEME}{base64}")),
            Self::Plain(_) => None,
        }
    }

    /// Returns true for image messages.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}
