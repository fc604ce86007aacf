//! Presentation layer facing the chat host.

/// Console sink for standalone runs.
pub mod console_sink;
/// Command events.
pub mod event;
/// Plugin lifecycle and command handling.
pub mod plugin;

pub use console_sink::ConsoleSink;
pub use event::{COMMAND_NAME, CommandEvent, parse_command};
pub use plugin::{InitError, OneLastPlugin};
