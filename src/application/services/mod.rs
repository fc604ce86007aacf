//! Image pipeline services.

pub mod config_resolver;
pub mod image_compressor;
pub mod image_extractor;
pub mod image_fetcher;

pub use config_resolver::resolve_config;
pub use image_compressor::{ImageCompressor, QUALITY_LADDER};
pub use image_extractor::ImageExtractor;
pub use image_fetcher::ImageFetcher;
