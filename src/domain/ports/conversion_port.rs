//! Port for the remote stylization service.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::{CompressedImage, ConversionConfig};
use crate::domain::errors::ConversionError;

/// Uploads an image with its options and returns the generated image.
#[async_trait]
pub trait ConversionPort: Send + Sync {
    /// Performs one request-response exchange. No retries.
    async fn convert(
        &self,
        image: &CompressedImage,
        config: &ConversionConfig,
    ) -> Result<Bytes, ConversionError>;
}
