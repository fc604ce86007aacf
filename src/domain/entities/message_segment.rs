//! Message content tree.

use serde::{Deserialize, Serialize};

use super::ImageRef;

/// One element of a chat message's content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageSegment {
    /// Image attachment.
    Image(ImageRef),
    /// Quoted message, carrying the quoted content chain.
    Reply {
        /// Segments of the quoted message.
        chain: Vec<MessageSegment>,
    },
    /// Plain text.
    Plain {
        /// Text content.
        text: String,
    },
    /// Any element this plugin does not care about.
    Other,
}

impl MessageSegment {
    /// Creates a text segment.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    /// Creates a reply segment around the quoted chain.
    #[must_use]
    pub const fn reply(chain: Vec<Self>) -> Self {
        Self::Reply { chain }
    }

    /// Dispatches this segment to the matching visitor method.
    pub fn accept<V: SegmentVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Image(image) => visitor.visit_image(image),
            Self::Reply { chain } => visitor.visit_reply(chain),
            Self::Plain { text } => visitor.visit_plain(text),
            Self::Other => visitor.visit_other(),
        }
    }
}

/// Typed walker over message segments.
///
/// Every method defaults to doing nothing, so visitors only implement
/// the variants they handle.
pub trait SegmentVisitor {
    /// Called for an image segment.
    fn visit_image(&mut self, _image: &ImageRef) {}

    /// Called for a reply segment with its quoted chain.
    fn visit_reply(&mut self, _chain: &[MessageSegment]) {}

    /// Called for a text segment.
    fn visit_plain(&mut self, _text: &str) {}

    /// Called for any other segment.
    fn visit_other(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        images: usize,
        replies: usize,
        others: usize,
    }

    impl SegmentVisitor for Counter {
        fn visit_image(&mut self, _image: &ImageRef) {
            self.images += 1;
        }

        fn visit_reply(&mut self, _chain: &[MessageSegment]) {
            self.replies += 1;
        }

        fn visit_other(&mut self) {
            self.others += 1;
        }
    }

    #[test]
    fn test_accept_dispatches_by_variant() {
        let segments = vec![
            MessageSegment::Image(ImageRef::from_url("a")),
            MessageSegment::reply(vec![MessageSegment::Image(ImageRef::from_url("b"))]),
            MessageSegment::plain("hello"),
            MessageSegment::Other,
        ];

        let mut counter = Counter::default();
        for segment in &segments {
            segment.accept(&mut counter);
        }

        assert_eq!(counter.images, 1);
        assert_eq!(counter.replies, 1);
        assert_eq!(counter.others, 1);
    }

    #[test]
    fn test_deserialize_tagged_segments() {
        let json = r#"[
            {"type": "image", "url": "https://cdn/x.png"},
            {"type": "reply", "chain": [{"type": "image", "file": "y.jpg"}]},
            {"type": "plain", "text": "hi"}
        ]"#;

        let segments: Vec<MessageSegment> = serde_json::from_str(json).unwrap();

        assert_eq!(
            segments[0],
            MessageSegment::Image(ImageRef::from_url("https://cdn/x.png"))
        );
        assert_eq!(
            segments[1],
            MessageSegment::reply(vec![MessageSegment::Image(ImageRef::from_file("y.jpg"))])
        );
        assert_eq!(segments[2], MessageSegment::plain("hi"));
    }
}
