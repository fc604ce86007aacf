//! `OneLast` - One Last Kiss style image generator for chat bots.
//!
//! Collects the images attached to (or quoted by) a command, recompresses
//! them under a size budget, sends each to a remote stylization service and
//! replies with the generated images.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the conversion pipeline and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the plugin entry point.
pub mod presentation;

/// Current version of the plugin.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Plugin name.
pub const NAME: &str = "onelast";
