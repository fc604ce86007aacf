//! Plugin entry point wired to the chat host.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tracing::{error, info};

use crate::application::dto::PluginSettings;
use crate::application::messages;
use crate::application::use_cases::{ImageOutcome, OneLastUseCase};
use crate::domain::entities::OutboundMessage;
use crate::domain::errors::{ConversionError, FetchError, PluginError};
use crate::domain::ports::{AttachmentResolverPort, ConversionPort, MessageSinkPort};
use crate::infrastructure::{HttpConversionClient, LocalAttachmentResolver, PluginConfig};

use super::event::CommandEvent;

/// Errors raised while starting the plugin.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The conversion client could not be created.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// The attachment resolver could not be created.
    #[error(transparent)]
    Attachments(#[from] FetchError),
}

/// The `onelast` command handler.
pub struct OneLastPlugin {
    settings: Arc<PluginSettings>,
    use_case: OneLastUseCase,
    client: Option<Arc<HttpConversionClient>>,
}

impl OneLastPlugin {
    /// Validates the configuration and opens the pooled network client.
    ///
    /// An unusable endpoint does not fail startup; every invocation then
    /// answers with a "not configured" message.
    ///
    /// # Errors
    /// Returns error if an HTTP client cannot be created.
    pub fn init(config: &PluginConfig) -> Result<Self, InitError> {
        let settings = Arc::new(config.to_settings());
        let client = Arc::new(HttpConversionClient::new(
            settings.endpoint.clone().unwrap_or_default(),
        )?);
        let resolver = Arc::new(LocalAttachmentResolver::new()?);

        info!(
            enabled = settings.is_enabled(),
            max_images = settings.max_images,
            max_file_size_mb = settings.max_file_size_mb,
            options = settings.default_options.len(),
            "OneLast plugin initialized"
        );

        let mut plugin = Self::with_ports(settings, resolver, client.clone());
        plugin.client = Some(client);
        Ok(plugin)
    }

    /// Creates plugin over explicit ports.
    #[must_use]
    pub fn with_ports(
        settings: Arc<PluginSettings>,
        resolver: Arc<dyn AttachmentResolverPort>,
        conversion: Arc<dyn ConversionPort>,
    ) -> Self {
        Self {
            use_case: OneLastUseCase::new(settings.clone(), resolver, conversion),
            settings,
            client: None,
        }
    }

    /// Validated settings.
    #[must_use]
    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Handles one command event.
    ///
    /// Anything escaping the use case, panics included, is logged, reported
    /// with a generic message, and stops the event's propagation.
    pub async fn handle_command(
        &self,
        event: &mut CommandEvent,
        sink: &dyn MessageSinkPort,
    ) -> Vec<ImageOutcome> {
        let run = self.use_case.execute(event.to_request(), sink);

        let failure = match AssertUnwindSafe(run).catch_unwind().await {
            Ok(Ok(outcomes)) => return outcomes,
            Ok(Err(e)) => e,
            Err(panic) => PluginError::Panicked(panic_message(panic.as_ref())),
        };

        error!(error = ?failure, "OneLast command failed");
        if let Err(e) = sink
            .send(OutboundMessage::plain(messages::INTERNAL_ERROR))
            .await
        {
            error!(error = %e, "Failed to report internal error");
        }
        event.stop_event();
        Vec::new()
    }

    /// Closes the pooled network client.
    pub async fn terminate(&self) {
        if let Some(client) = &self.client {
            client.close().await;
        }
        info!("OneLast plugin terminated");
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        CompressedImage, ConversionConfig, ImageRef, MessageSegment,
    };
    use crate::domain::ports::mocks::{MockAttachmentResolver, MockConversionPort, RecordingSink};
    use async_trait::async_trait;
    use bytes::Bytes;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    struct PanickingConversion;

    #[async_trait]
    impl ConversionPort for PanickingConversion {
        async fn convert(
            &self,
            _image: &CompressedImage,
            _config: &ConversionConfig,
        ) -> Result<Bytes, ConversionError> {
            panic!("conversion exploded")
        }
    }

    fn png() -> Bytes {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, image::Rgb([9, 9, 9])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        Bytes::from(buf.into_inner())
    }

    fn event() -> CommandEvent {
        CommandEvent::new(vec![MessageSegment::Image(ImageRef::from_url("a"))], None)
    }

    fn plugin(conversion: Arc<dyn ConversionPort>) -> OneLastPlugin {
        OneLastPlugin::with_ports(
            Arc::new(PluginSettings::new("https://api.example")),
            Arc::new(MockAttachmentResolver::new(png())),
            conversion,
        )
    }

    #[tokio::test]
    async fn test_successful_command_keeps_propagating() {
        let plugin = plugin(Arc::new(MockConversionPort::new()));
        let sink = RecordingSink::new();
        let mut event = event();

        let outcomes = plugin.handle_command(&mut event, &sink).await;

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_success());
        assert!(!event.is_stopped());
        assert!(sink.messages().await[1].is_image());
    }

    #[tokio::test]
    async fn test_panic_is_reported_and_stops_event() {
        let plugin = plugin(Arc::new(PanickingConversion));
        let sink = RecordingSink::new();
        let mut event = event();

        let outcomes = plugin.handle_command(&mut event, &sink).await;

        assert!(outcomes.is_empty());
        assert!(event.is_stopped());
        assert_eq!(
            sink.texts().await.last().map(String::as_str),
            Some(messages::INTERNAL_ERROR)
        );
    }

    #[tokio::test]
    async fn test_sink_failure_stops_event() {
        let plugin = plugin(Arc::new(MockConversionPort::new()));
        let sink = RecordingSink::failing();
        let mut event = event();

        plugin.handle_command(&mut event, &sink).await;

        assert!(event.is_stopped());
    }

    #[tokio::test]
    async fn test_init_with_placeholder_is_disabled() {
        let plugin = OneLastPlugin::init(&PluginConfig::default()).unwrap();
        let sink = RecordingSink::new();
        let mut event = event();

        plugin.handle_command(&mut event, &sink).await;
        plugin.terminate().await;

        assert!(!plugin.settings().is_enabled());
        assert_eq!(sink.texts().await, vec![messages::NOT_CONFIGURED]);
        assert!(!event.is_stopped());
    }

    #[test]
    fn test_panic_message_variants() {
        let boxed: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(42);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
