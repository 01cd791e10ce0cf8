//! Image assets: source classification, fetching and decoding.
//!
//! External IO happens here and nowhere else; the layer drawer only sees [`decode::PreparedImage`].

/// Image decoding into premultiplied RGBA8.
pub mod decode;
/// Async loaders (HTTP, in-memory).
pub mod loader;
/// Source strings, data URIs and cache-busting.
pub mod source;
