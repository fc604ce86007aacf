//! Resolves image references to raw bytes without failing the batch.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, warn};

use crate::domain::entities::ImageRef;
use crate::domain::ports::AttachmentResolverPort;

/// Wraps the host's attachment resolver, turning failures into absence.
#[derive(Clone)]
pub struct ImageFetcher {
    resolver: Arc<dyn AttachmentResolverPort>,
}

impl ImageFetcher {
    /// Creates fetcher over the given resolver.
    #[must_use]
    pub fn new(resolver: Arc<dyn AttachmentResolverPort>) -> Self {
        Self { resolver }
    }

    /// Returns the image bytes, or `None` if they could not be obtained.
    pub async fn fetch(&self, image: &ImageRef) -> Option<Bytes> {
        match self.resolver.resolve(image).await {
            Ok(bytes) if bytes.is_empty() => {
                warn!(
                    url = image.url().unwrap_or_default(),
                    file = image.file().unwrap_or_default(),
                    "Attachment resolved to an empty payload"
                );
                None
            }
            Ok(bytes) => {
                debug!(locator = %image, size = bytes.len(), "Fetched image");
                Some(bytes)
            }
            Err(e) => {
                error!(locator = %image, error = ?e, "Failed to download image");
                None
            }
        }
    }
}
