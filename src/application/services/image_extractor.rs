//! Collects image references from a message's content tree.

use std::collections::HashSet;

use crate::domain::entities::{ImageRef, MessageSegment, SegmentVisitor};

/// Walks top-level segments, gathering direct images and the images
/// of quoted messages.
#[derive(Default)]
struct ImageCollector {
    direct: Vec<ImageRef>,
    replied: Vec<ImageRef>,
}

impl SegmentVisitor for ImageCollector {
    fn visit_image(&mut self, image: &ImageRef) {
        self.direct.push(image.clone());
    }

    fn visit_reply(&mut self, chain: &[MessageSegment]) {
        let mut quoted = QuotedImages::default();
        for segment in chain {
            segment.accept(&mut quoted);
        }
        self.replied.extend(quoted.0);
    }
}

/// Images inside a quoted chain. Nested quotes are not expanded.
#[derive(Default)]
struct QuotedImages(Vec<ImageRef>);

impl SegmentVisitor for QuotedImages {
    fn visit_image(&mut self, image: &ImageRef) {
        self.0.push(image.clone());
    }
}

/// Extracts image references from message segments.
pub struct ImageExtractor;

impl ImageExtractor {
    /// Returns unique images: direct ones in message order, then replied ones.
    ///
    /// References without any identity are always kept.
    #[must_use]
    pub fn extract(segments: &[MessageSegment]) -> Vec<ImageRef> {
        let mut collector = ImageCollector::default();
        for segment in segments {
            segment.accept(&mut collector);
        }

        let mut seen = HashSet::new();
        collector
            .direct
            .into_iter()
            .chain(collector.replied)
            .filter(|image| match image.identity() {
                Some(id) => seen.insert(id.to_string()),
                None => true,
            })
            .collect()
    }
}
