//! Batch conversion use case.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::application::dto::{ConversionRequest, OverflowPolicy, PluginSettings};
use crate::application::messages;
use crate::application::services::{ImageCompressor, ImageExtractor, ImageFetcher, resolve_config};
use crate::domain::entities::{ConversionConfig, ImageRef, OutboundMessage};
use crate::domain::errors::{ConversionError, PluginError};
use crate::domain::ports::{AttachmentResolverPort, ConversionPort, MessageSinkPort};

/// Result of one image's pass through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// Generated image was sent to the chat.
    Converted {
        /// Size of the generated image in bytes.
        size: usize,
    },
    /// Bytes could not be obtained.
    DownloadFailed,
    /// Undecodable, or over the limit at the lowest quality.
    TooLarge,
    /// Service answered without an image.
    ApiFailed {
        /// HTTP status of the answer.
        status: u16,
    },
    /// Service did not answer in time.
    TimedOut,
    /// Any other failure.
    Failed {
        /// Error description shown to the user.
        reason: String,
    },
}

impl ImageOutcome {
    /// Returns whether the image was converted.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }
}

/// Drives extraction, option resolution and the per-image pipeline for one
/// command invocation, emitting messages as each step completes.
#[derive(Clone)]
pub struct OneLastUseCase {
    settings: Arc<PluginSettings>,
    fetcher: ImageFetcher,
    compressor: ImageCompressor,
    conversion: Arc<dyn ConversionPort>,
}

impl OneLastUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(
        settings: Arc<PluginSettings>,
        resolver: Arc<dyn AttachmentResolverPort>,
        conversion: Arc<dyn ConversionPort>,
    ) -> Self {
        let compressor = ImageCompressor::new(settings.max_file_size_bytes());
        Self {
            settings,
            fetcher: ImageFetcher::new(resolver),
            compressor,
            conversion,
        }
    }

    /// Runs one invocation. Images are processed strictly in order; a failing
    /// image never stops the ones after it.
    ///
    /// Returns the per-image outcomes, empty if the batch ended early.
    ///
    /// # Errors
    /// Returns error only if a message cannot be delivered.
    #[instrument(skip_all, fields(invocation = %Uuid::new_v4()))]
    pub async fn execute(
        &self,
        request: ConversionRequest,
        sink: &dyn MessageSinkPort,
    ) -> Result<Vec<ImageOutcome>, PluginError> {
        if !self.settings.is_enabled() {
            warn!("Invocation rejected, endpoint not configured");
            sink.send(OutboundMessage::plain(messages::NOT_CONFIGURED))
                .await?;
            return Ok(Vec::new());
        }

        let images = ImageExtractor::extract(&request.segments);
        if images.is_empty() {
            debug!("No images in invocation");
            sink.send(OutboundMessage::plain(messages::NO_IMAGES)).await?;
            return Ok(Vec::new());
        }

        let Ok(config) = resolve_config(
            &self.settings.default_options,
            request.options.as_deref(),
        ) else {
            sink.send(OutboundMessage::plain(messages::INVALID_OPTIONS))
                .await?;
            return Ok(Vec::new());
        };

        let Some(images) = self.admit(images, sink).await? else {
            return Ok(Vec::new());
        };

        info!(count = images.len(), "Starting batch");

        let mut outcomes = Vec::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            let index = i + 1;
            let (outcome, message) = self.process_image(index, image, &config).await;
            sink.send(message).await?;
            outcomes.push(outcome);
        }

        info!(
            total = outcomes.len(),
            converted = outcomes.iter().filter(|o| o.is_success()).count(),
            "Batch finished"
        );

        Ok(outcomes)
    }

    /// Applies the image count limit, announcing the accepted batch.
    async fn admit(
        &self,
        mut images: Vec<ImageRef>,
        sink: &dyn MessageSinkPort,
    ) -> Result<Option<Vec<ImageRef>>, PluginError> {
        let found = images.len();
        let max = self.settings.max_images;

        if found <= max {
            sink.send(OutboundMessage::plain(messages::started(found)))
                .await?;
            return Ok(Some(images));
        }

        match self.settings.overflow_policy {
            OverflowPolicy::Truncate => {
                info!(found, max, "Truncating batch");
                sink.send(OutboundMessage::plain(messages::truncated(found, max)))
                    .await?;
                images.truncate(max);
                Ok(Some(images))
            }
            OverflowPolicy::Reject => {
                info!(found, max, "Rejecting oversized batch");
                sink.send(OutboundMessage::plain(messages::rejected(found, max)))
                    .await?;
                Ok(None)
            }
        }
    }

    async fn process_image(
        &self,
        index: usize,
        image: &ImageRef,
        config: &ConversionConfig,
    ) -> (ImageOutcome, OutboundMessage) {
        let Some(raw) = self.fetcher.fetch(image).await else {
            return (
                ImageOutcome::DownloadFailed,
                OutboundMessage::plain(messages::download_failed(index)),
            );
        };

        let Some(compressed) = self.compressor.compress(raw).await else {
            return (
                ImageOutcome::TooLarge,
                OutboundMessage::plain(messages::too_large(
                    index,
                    self.settings.max_file_size_mb,
                )),
            );
        };

        match self.conversion.convert(&compressed, config).await {
            Ok(result) if result.is_empty() => {
                warn!(index, "Conversion succeeded without an image body");
                (
                    ImageOutcome::ApiFailed { status: 200 },
                    OutboundMessage::plain(messages::api_failed(index)),
                )
            }
            Ok(result) => {
                debug!(index, size = result.len(), "Image converted");
                (
                    ImageOutcome::Converted { size: result.len() },
                    OutboundMessage::image(&result),
                )
            }
            Err(ConversionError::HttpStatus { status, .. }) => (
                ImageOutcome::ApiFailed { status },
                OutboundMessage::plain(messages::api_failed(index)),
            ),
            Err(ConversionError::Timeout) => (
                ImageOutcome::TimedOut,
                OutboundMessage::plain(messages::timed_out(index)),
            ),
            Err(e @ ConversionError::Transport(_)) => {
                error!(index, locator = %image, error = ?e, "Error processing image");
                let reason = e.to_string();
                let message = OutboundMessage::plain(messages::unknown_error(index, &reason));
                (ImageOutcome::Failed { reason }, message)
            }
        }
    }
}
