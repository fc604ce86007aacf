//! Data transfer objects for the application layer.

mod conversion_dto;

pub use conversion_dto::{ConversionRequest, OverflowPolicy, PluginSettings};
