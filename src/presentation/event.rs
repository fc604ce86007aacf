//! Inbound command events.

use crate::application::dto::ConversionRequest;
use crate::domain::entities::MessageSegment;

/// Command name the plugin answers to.
pub const COMMAND_NAME: &str = "onelast";

/// Parses `/onelast [options]` or `onelast [options]`.
///
/// Returns `None` for other text, otherwise the trimmed trailing argument if any.
#[must_use]
pub fn parse_command(text: &str) -> Option<Option<&str>> {
    let text = text.trim_start();
    let text = text.strip_prefix('/').unwrap_or(text);
    let rest = text.strip_prefix(COMMAND_NAME)?;

    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let argument = rest.trim();
    Some((!argument.is_empty()).then_some(argument))
}

/// A command invocation as delivered by the chat host.
#[derive(Debug, Clone, Default)]
pub struct CommandEvent {
    segments: Vec<MessageSegment>,
    argument: Option<String>,
    stopped: bool,
}

impl CommandEvent {
    /// Creates event from message content and the already parsed argument.
    #[must_use]
    pub const fn new(segments: Vec<MessageSegment>, argument: Option<String>) -> Self {
        Self {
            segments,
            argument,
            stopped: false,
        }
    }

    /// Creates event from raw message content if its first text segment is the command.
    #[must_use]
    pub fn from_message(segments: Vec<MessageSegment>) -> Option<Self> {
        let argument = segments.iter().find_map(|segment| match segment {
            MessageSegment::Plain { text } if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        })?;
        let argument = parse_command(argument)?.map(String::from);
        Some(Self::new(segments, argument))
    }

    /// Message content.
    #[must_use]
    pub fn segments(&self) -> &[MessageSegment] {
        &self.segments
    }

    /// Raw option override.
    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    /// Tells the host not to pass this event to further handlers.
    pub fn stop_event(&mut self) {
        self.stopped = true;
    }

    /// Returns whether propagation was stopped.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Builds the use case request.
    #[must_use]
    pub fn to_request(&self) -> ConversionRequest {
        ConversionRequest {
            segments: self.segments.clone(),
            options: self.argument.clone(),
        }
    }
}
