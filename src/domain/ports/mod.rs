mod attachment_resolver_port;
mod conversion_port;
mod message_sink_port;

pub use attachment_resolver_port::AttachmentResolverPort;
pub use conversion_port::ConversionPort;
pub use message_sink_port::MessageSinkPort;
