//! Standalone attachment resolution.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, trace};

use crate::domain::entities::ImageRef;
use crate::domain::errors::FetchError;
use crate::domain::ports::AttachmentResolverPort;

const BASE64_SCHEME: &str = "base64://";
const FILE_SCHEME: &str = "file://";
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolves `base64://` payloads, `http(s)://` URLs, `file://` URIs and plain paths.
pub struct LocalAttachmentResolver {
    http_client: Client,
}

impl LocalAttachmentResolver {
    /// Creates resolver with its own HTTP client.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { http_client })
    }

    async fn download(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "HTTP {}: {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read body: {e}")))
    }
}

#[async_trait]
impl AttachmentResolverPort for LocalAttachmentResolver {
    async fn resolve(&self, image: &ImageRef) -> Result<Bytes, FetchError> {
        let locator = image.identity().ok_or(FetchError::MissingLocator)?;

        let bytes = if let Some(data) = locator.strip_prefix(BASE64_SCHEME) {
            trace!("Decoding inline base64 image");
            Bytes::from(STANDARD.decode(data.trim())?)
        } else if locator.starts_with("http://") || locator.starts_with("https://") {
            debug!(url = %locator, "Downloading image");
            self.download(locator).await?
        } else if let Some(path) = locator.strip_prefix(FILE_SCHEME) {
            Bytes::from(tokio::fs::read(path).await?)
        } else if locator.contains("://") {
            return Err(FetchError::Unsupported(locator.to_string()));
        } else {
            Bytes::from(tokio::fs::read(locator).await?)
        };

        if bytes.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_resolves_base64_payload() {
        let resolver = LocalAttachmentResolver::new().unwrap();
        let image = ImageRef::from_file("base64://aGVsbG8=");
        assert_eq!(&resolver.resolve(&image).await.unwrap()[..], b"hello");
    }

    #[tokio::test]
    async fn test_invalid_base64_fails() {
        let resolver = LocalAttachmentResolver::new().unwrap();
        let image = ImageRef::from_file("base64://!!!");
        assert!(matches!(
            resolver.resolve(&image).await,
            Err(FetchError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_resolves_paths_and_file_uris() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cat.png");
        std::fs::write(&file, b"png-bytes").unwrap();
        let resolver = LocalAttachmentResolver::new().unwrap();

        let plain = ImageRef::from_file(file.display().to_string());
        let uri = ImageRef::from_file(format!("file://{}", file.display()));

        assert_eq!(&resolver.resolve(&plain).await.unwrap()[..], b"png-bytes");
        assert_eq!(&resolver.resolve(&uri).await.unwrap()[..], b"png-bytes");
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let resolver = LocalAttachmentResolver::new().unwrap();
        let image = ImageRef::from_file("/definitely/not/here.png");
        assert!(matches!(resolver.resolve(&image).await, Err(FetchError::Io(_))));
    }

    #[tokio::test]
    async fn test_downloads_urls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"remote".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let resolver = LocalAttachmentResolver::new().unwrap();

        let ok = ImageRef::from_url(format!("{}/a.png", server.uri()));
        let missing = ImageRef::from_url(format!("{}/missing.png", server.uri()));

        assert_eq!(&resolver.resolve(&ok).await.unwrap()[..], b"remote");
        assert!(matches!(
            resolver.resolve(&missing).await,
            Err(FetchError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_unknown_schemes_and_anonymous_refs() {
        let resolver = LocalAttachmentResolver::new().unwrap();
        assert!(matches!(
            resolver.resolve(&ImageRef::from_url("ftp://host/a.png")).await,
            Err(FetchError::Unsupported(_))
        ));
        assert!(matches!(
            resolver.resolve(&ImageRef::anonymous()).await,
            Err(FetchError::MissingLocator)
        ));
    }

    #[tokio::test]
    async fn test_empty_payload_fails() {
        let resolver = LocalAttachmentResolver::new().unwrap();
        let image = ImageRef::from_file("base64://");
        assert!(matches!(resolver.resolve(&image).await, Err(FetchError::Empty)));
    }
}
