//! Remote stylization service adapter.

mod client;

pub use client::HttpConversionClient;
