//! Stylization service HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::domain::entities::{CompressedImage, ConversionConfig};
use crate::domain::errors::ConversionError;
use crate::domain::ports::ConversionPort;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const IMAGE_FIELD: &str = "image";
const CONFIG_FIELD: &str = "config";
const IMAGE_FILE_NAME: &str = "image.jpg";
const IMAGE_MIME: &str = "image/jpeg";

/// Pooled client posting images to the conversion endpoint.
///
/// Safe to share between concurrent invocations.
pub struct HttpConversionClient {
    client: RwLock<Option<Client>>,
    endpoint: String,
    timeout: Duration,
}

impl HttpConversionClient {
    /// Creates client for the given endpoint with the standard timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ConversionError> {
        Self::with_timeout(endpoint, REQUEST_TIMEOUT)
    }

    /// Creates client with a custom per-request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConversionError> {
        let client = Client::builder().build().map_err(|e| {
            ConversionError::transport(format!("failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client: RwLock::new(Some(client)),
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Releases the connection pool. In-flight requests finish on their own
    /// clone of the client; later calls fail.
    pub async fn close(&self) {
        if self.client.write().await.take().is_some() {
            info!("Conversion client closed");
        }
    }

    /// Returns whether [`close`](Self::close) has been called.
    pub async fn is_closed(&self) -> bool {
        self.client.read().await.is_none()
    }

    fn build_form(image: &CompressedImage, config: &ConversionConfig) -> Result<Form, ConversionError> {
        let image_part = Part::bytes(image.data().to_vec())
            .file_name(IMAGE_FILE_NAME)
            .mime_str(IMAGE_MIME)
            .map_err(|e| ConversionError::transport(format!("invalid image part: {e}")))?;

        Ok(Form::new()
            .part(IMAGE_FIELD, image_part)
            .text(CONFIG_FIELD, config.to_json()))
    }
}

fn map_request_error(e: &reqwest::Error) -> ConversionError {
    if e.is_timeout() {
        error!("Conversion request timed out");
        ConversionError::Timeout
    } else {
        error!(error = %e, "Conversion request failed");
        ConversionError::transport(e.to_string())
    }
}

#[async_trait]
impl ConversionPort for HttpConversionClient {
    async fn convert(
        &self,
        image: &CompressedImage,
        config: &ConversionConfig,
    ) -> Result<Bytes, ConversionError> {
        let client = self
            .client
            .read()
            .await
            .clone()
            .ok_or_else(|| ConversionError::transport("client closed"))?;

        let form = Self::build_form(image, config)?;

        debug!(
            endpoint = %self.endpoint,
            size = image.len(),
            quality = image.quality(),
            "Sending conversion request"
        );

        let response = client
            .post(&self.endpoint)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| map_request_error(&e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Conversion API error");
            return Err(ConversionError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response.bytes().await.map_err(|e| map_request_error(&e))
    }
}
