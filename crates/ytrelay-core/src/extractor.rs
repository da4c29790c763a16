//! The extraction collaborator boundary
//!
//! Handlers only ever see this trait, so an alternative extraction backend
//! can be substituted without touching the HTTP layer.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use serde::Deserialize;

use crate::error::ExtractError;
use crate::format::RawFormat;

/// Byte stream handed to the HTTP layer. Bytes are relayed as they arrive
/// upstream; nothing is buffered beyond the transport's own chunks.
pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// Video metadata as returned by the collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub formats: Vec<RawFormat>,
}

/// The external extraction service: URL validation, metadata retrieval and
/// raw stream access.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Cheap syntactic check that a string is a well-formed video URL.
    /// Must not touch the network.
    fn is_valid_url(&self, url: &str) -> bool;

    /// Fetch stream metadata for a URL.
    async fn video_info(&self, url: &str) -> Result<VideoInfo, ExtractError>;

    /// Open the raw byte stream for the variant whose identifier matches
    /// `itag` exactly.
    async fn open_stream(&self, url: &str, itag: &str) -> Result<ByteStream, ExtractError>;
}
