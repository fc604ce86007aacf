//! Size-bounded JPEG payloads.

use bytes::Bytes;

/// JPEG payload produced by the recompressor, known to fit the configured size limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    data: Bytes,
    quality: u8,
}

impl CompressedImage {
    /// Wraps an encoded buffer if it is no larger than `max_bytes`.
    #[must_use]
    pub fn within_limit(data: impl Into<Bytes>, quality: u8, max_bytes: usize) -> Option<Self> {
        let data = data.into();
        (data.len() <= max_bytes).then_some(Self { data, quality })
    }

    /// Encoded JPEG bytes.
    #[must_use]
    pub const fn data(&self) -> &Bytes {
        &self.data
    }

    /// JPEG quality that produced this payload.
    #[must_use]
    pub const fn quality(&self) -> u8 {
        self.quality
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_limit_rejects_oversized() {
        assert!(CompressedImage::within_limit(vec![0u8; 11], 85, 10).is_none());
        let fits = CompressedImage::within_limit(vec![0u8; 10], 70, 10).unwrap();
        assert_eq!(fits.len(), 10);
        assert_eq!(fits.quality(), 70);
    }
}
