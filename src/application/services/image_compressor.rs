//! JPEG recompression under a size ceiling.

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageResult, RgbImage};
use tracing::{debug, error, trace, warn};

use crate::domain::entities::CompressedImage;

/// JPEG qualities tried in order. At most three encodes per image.
pub const QUALITY_LADDER: [u8; 3] = [85, 70, 50];

/// Re-encodes arbitrary images as JPEG no larger than a byte limit.
#[derive(Debug, Clone, Copy)]
pub struct ImageCompressor {
    max_bytes: usize,
}

impl ImageCompressor {
    /// Creates compressor with the given size ceiling.
    #[must_use]
    pub const fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Size ceiling in bytes.
    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Compresses on the blocking pool so the async scheduler stays free.
    ///
    /// Returns `None` if the input cannot be decoded or no ladder step fits.
    pub async fn compress(&self, raw: Bytes) -> Option<CompressedImage> {
        let max_bytes = self.max_bytes;
        match tokio::task::spawn_blocking(move || compress_blocking(&raw, max_bytes)).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Compression task panicked");
                None
            }
        }
    }
}

/// Synchronous body of [`ImageCompressor::compress`].
#[must_use]
pub fn compress_blocking(raw: &[u8], max_bytes: usize) -> Option<CompressedImage> {
    let decoded = match image::load_from_memory(raw) {
        Ok(img) => img,
        Err(e) => {
            error!(error = %e, "Failed to decode image");
            return None;
        }
    };

    let rgb = normalize_to_rgb(decoded);

    let mut last_size = 0;
    for quality in QUALITY_LADDER {
        let encoded = match encode_jpeg(&rgb, quality) {
            Ok(buf) => buf,
            Err(e) => {
                error!(quality, error = %e, "Failed to encode JPEG");
                return None;
            }
        };
        last_size = encoded.len();

        if let Some(compressed) = CompressedImage::within_limit(encoded, quality, max_bytes) {
            debug!(quality, size = compressed.len(), "Image compressed");
            return Some(compressed);
        }
        trace!(quality, size = last_size, max_bytes, "Encoded image over limit");
    }

    warn!(
        size = last_size,
        max_bytes,
        quality = QUALITY_LADDER[QUALITY_LADDER.len() - 1],
        "Image exceeds size limit even after compression"
    );
    None
}

/// Flattens any color mode to 8-bit RGB.
///
/// Lossy on purpose: alpha and extra channels are discarded since JPEG cannot carry them.
fn normalize_to_rgb(img: DynamicImage) -> RgbImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}

fn encode_jpeg(rgb: &RgbImage, quality: u8) -> ImageResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    rgb.write_with_encoder(encoder)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn noise_image(width: u32, height: u32) -> RgbImage {
        let mut state: u32 = 0x1234_5678;
        RgbImage::from_fn(width, height, |_, _| {
            let mut next = || {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 24) as u8
            };
            image::Rgb([next(), next(), next()])
        })
    }

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_transparent_png_becomes_rgb_jpeg() {
        let rgba = RgbaImage::from_pixel(32, 16, Rgba([200, 10, 10, 0]));
        let raw = png_bytes(&DynamicImage::ImageRgba8(rgba));

        let compressed = compress_blocking(&raw, usize::MAX).unwrap();

        assert_eq!(compressed.quality(), 85);
        assert_eq!(
            image::guess_format(compressed.data()).unwrap(),
            ImageFormat::Jpeg
        );
        let decoded = image::load_from_memory(compressed.data()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
        assert!(matches!(decoded, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn test_falls_through_ladder_to_lower_quality() {
        let rgb = noise_image(96, 96);
        let size_at_70 = encode_jpeg(&rgb, 70).unwrap().len();
        let raw = png_bytes(&DynamicImage::ImageRgb8(rgb));

        let compressed = compress_blocking(&raw, size_at_70).unwrap();

        assert_eq!(compressed.quality(), 70);
        assert!(compressed.len() <= size_at_70);
    }

    #[test]
    fn test_returns_none_when_lowest_quality_exceeds_limit() {
        let rgb = noise_image(96, 96);
        let size_at_50 = encode_jpeg(&rgb, 50).unwrap().len();
        let raw = png_bytes(&DynamicImage::ImageRgb8(rgb));

        assert!(compress_blocking(&raw, size_at_50 - 1).is_none());
        assert!(compress_blocking(&raw, size_at_50).is_some());
    }

    #[test]
    fn test_corrupt_input_returns_none() {
        assert!(compress_blocking(b"definitely not an image", usize::MAX).is_none());
    }

    #[tokio::test]
    async fn test_async_compress_respects_limit() {
        let raw = png_bytes(&DynamicImage::ImageRgb8(noise_image(8, 8)));
        let compressor = ImageCompressor::new(1024 * 1024);

        let compressed = compressor.compress(Bytes::from(raw)).await.unwrap();

        assert!(compressed.len() <= compressor.max_bytes());
    }
}
