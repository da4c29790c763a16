//! yt-dlp backed extraction collaborator

use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::process::{Child, ChildStdout, Command};
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::extractor::{ByteStream, Extractor, VideoInfo};

#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
}

impl YtDlp {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    fn classify_failure(url: &str, stderr: &str, code: Option<i32>) -> ExtractError {
        if stderr.contains("Video unavailable") || stderr.contains("Private video") {
            return ExtractError::VideoUnavailable(url.to_string());
        }
        if stderr.contains("is not a valid URL") {
            return ExtractError::InvalidUrl(url.to_string());
        }
        ExtractError::YtDlpFailed(code)
    }
}

fn launch_error(err: std::io::Error) -> ExtractError {
    if err.kind() == std::io::ErrorKind::NotFound {
        ExtractError::YtDlpNotFound
    } else {
        ExtractError::Io(err)
    }
}

#[async_trait]
impl Extractor for YtDlp {
    fn is_valid_url(&self, url: &str) -> bool {
        validate_video_url(url)
    }

    async fn video_info(&self, url: &str) -> Result<VideoInfo, ExtractError> {
        info!("Fetching stream metadata for: {}", url);

        let output = Command::new(&self.binary)
            .args(["-J", "--no-playlist", "--no-warnings", url])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(launch_error)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("yt-dlp stderr: {}", stderr);
            return Err(Self::classify_failure(url, &stderr, output.status.code()));
        }

        let metadata: VideoInfo = serde_json::from_slice(&output.stdout)
            .map_err(|e| ExtractError::MetadataParse(e.to_string()))?;

        debug!("Resolved {} ({} formats)", metadata.id, metadata.formats.len());
        Ok(metadata)
    }

    async fn open_stream(&self, url: &str, itag: &str) -> Result<ByteStream, ExtractError> {
        info!("Opening stream for {} (itag {})", url, itag);

        let mut child = Command::new(&self.binary)
            .args(["-f", itag, "-o", "-", "--no-playlist", "--no-warnings", "--quiet", url])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            // Dropping the stream must release the upstream transfer, even
            // when the client hangs up mid-download.
            .kill_on_drop(true)
            .spawn()
            .map_err(launch_error)?;

        let stdout = child.stdout.take().ok_or_else(|| {
            ExtractError::Io(std::io::Error::other("yt-dlp stdout not captured"))
        })?;

        Ok(ChildStream {
            _child: child,
            inner: ReaderStream::new(stdout),
        }
        .boxed())
    }
}

/// Stream over a yt-dlp child's stdout. The child handle is held so the
/// process dies with the stream.
struct ChildStream {
    _child: Child,
    inner: ReaderStream<ChildStdout>,
}

impl Stream for ChildStream {
    type Item = std::io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Validate that a string looks like a YouTube video URL
pub fn validate_video_url(url: &str) -> bool {
    let url = url.trim();
    (url.starts_with("http://") || url.starts_with("https://"))
        && (url.contains("youtube.com/watch")
            || url.contains("youtu.be/")
            || url.contains("youtube.com/shorts")
            || url.contains("music.youtube.com"))
}
