//! Domain entity definitions.

mod compressed_image;
mod conversion_config;
mod image_ref;
mod message_segment;
mod outbound_message;

pub use compressed_image::CompressedImage;
pub use conversion_config::ConversionConfig;
pub use image_ref::ImageRef;
pub use message_segment::{MessageSegment, SegmentVisitor};
pub use outbound_message::OutboundMessage;
