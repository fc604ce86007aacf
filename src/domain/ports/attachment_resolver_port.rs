//! Port for the host's attachment transfer capability.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::ImageRef;
use crate::domain::errors::FetchError;

/// Resolves image references to raw bytes.
#[async_trait]
pub trait AttachmentResolverPort: Send + Sync {
    /// Downloads or reads the referenced image.
    async fn resolve(&self, image: &ImageRef) -> Result<Bytes, FetchError>;
}
