//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{
    CompressedImage, ConversionConfig, ImageRef, MessageSegment, OutboundMessage, SegmentVisitor,
};
pub use errors::{ConversionError, FetchError, OverrideError, PluginError, SinkError};
pub use ports::{AttachmentResolverPort, ConversionPort, MessageSinkPort};
