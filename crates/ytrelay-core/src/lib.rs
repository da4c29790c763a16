//! ytrelay-core: extraction layer for the ytrelay download proxy

pub mod config;
pub mod error;
pub mod extractor;
pub mod format;
pub mod ytdlp;

pub use config::Config;
pub use error::{ConfigError, ExtractError};
pub use extractor::{ByteStream, Extractor, VideoInfo};
pub use format::{progressive_descriptors, FormatDescriptor, RawFormat};
pub use ytdlp::YtDlp;
