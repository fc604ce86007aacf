//! Host attachment transfer adapters.

mod resolver;

pub use resolver::LocalAttachmentResolver;
