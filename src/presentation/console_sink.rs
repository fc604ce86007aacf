//! Message sink used by the standalone binary.

use std::path::PathBuf;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::entities::OutboundMessage;
use crate::domain::errors::SinkError;
use crate::domain::ports::MessageSinkPort;

/// Prints text messages and writes generated images to a directory.
pub struct ConsoleSink {
    output_dir: PathBuf,
    written: Mutex<Vec<PathBuf>>,
}

impl ConsoleSink {
    /// Creates sink writing images into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: Mutex::new(Vec::new()),
        }
    }

    /// Files written so far.
    pub async fn written(&self) -> Vec<PathBuf> {
        self.written.lock().await.clone()
    }

    async fn write_image(&self, base64: &str) -> Result<PathBuf, SinkError> {
        let data = STANDARD
            .decode(base64)
            .map_err(|e| SinkError(format!("invalid image payload: {e}")))?;

        let path = self.output_dir.join(file_name(&data));
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| SinkError(format!("failed to create output dir: {e}")))?;
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| SinkError(format!("failed to write {}: {e}", path.display())))?;

        Ok(path)
    }
}

/// Content-addressed name with an extension guessed from the bytes.
fn file_name(data: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(data));
    let ext = match image::guess_format(data) {
        Ok(image::ImageFormat::Png) => "png",
        Ok(image::ImageFormat::Gif) => "gif",
        Ok(image::ImageFormat::WebP) => "webp",
        _ => "jpg",
    };
    format!("onelast-{}.{ext}", &digest[..16])
}

#[async_trait]
impl MessageSinkPort for ConsoleSink {
    async fn send(&self, message: OutboundMessage) -> Result<(), SinkError> {
        match message {
            OutboundMessage::Plain(text) => {
                println!("{text}");
            }
            OutboundMessage::Image { base64 } => {
                let path = self.write_image(&base64).await?;
                info!(path = %path.display(), "Generated image saved");
                println!("[image] {}", path.display());
                self.written.lock().await.push(path);
            }
        }
        Ok(())
    }
}
