//! Application layer with the conversion pipeline and DTOs.

/// Data transfer objects.
pub mod dto;
/// User-facing chat texts.
pub mod messages;
/// Pipeline services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{ConversionRequest, OverflowPolicy, PluginSettings};
pub use use_cases::{ImageOutcome, OneLastUseCase};
