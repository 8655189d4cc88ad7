//! Object store connection layer for range-read-bench
//!
//! This crate provides the narrow interface the benchmark driver needs from a
//! storage client: size lookup and a reader that can seek and read.
//!
//! # Backends
//!
//! - **S3**: any S3-compatible service reached over `http://` or `https://`
//! - **Local**: a directory on the local filesystem reached via `file://`
//!
//! The bucket is a path component for the local backend, so
//! `file:///srv/objects` with bucket `webvideo` reads from `/srv/objects/webvideo/`.
//!
//! # Example
//!
//! ```ignore
//! use range_read_object::{ObjectReader, ObjectStore, S3Store};
//!
//! let store = S3Store::connect("http://s3:8333", "webvideo", "none").await?;
//! let meta = store.stat("my/file/name.mp4").await?;
//! let mut reader = store.open("my/file/name.mp4").await?;
//! reader.seek(meta.size / 2).await?;
//! let mut buf = vec![0u8; 32 * 1024];
//! let n = reader.read(&mut buf).await?;
//! reader.close();
//! ```

mod error;
mod local;
mod s3;

use std::path::PathBuf;

pub use error::ObjectError;
pub use local::{LocalReader, LocalStore};
pub use s3::{S3Reader, S3Store};

/// Metadata returned by [`ObjectStore::stat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Object size in bytes
    pub size: u64,
}

/// A connected object store
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Reader handed out by [`ObjectStore::open`]
    type Reader: ObjectReader;

    /// Look up the size of `name`.
    async fn stat(&self, name: &str) -> Result<ObjectMeta, ObjectError>;

    /// Open a fresh reader positioned at the start of `name`.
    async fn open(&self, name: &str) -> Result<Self::Reader, ObjectError>;
}

/// An open, seekable object handle
#[async_trait::async_trait]
pub trait ObjectReader: Send {
    /// Move the read position to `offset` bytes from the start of the object.
    ///
    /// Returns the new position.
    async fn seek(&mut self, offset: u64) -> Result<u64, ObjectError>;

    /// Read up to `buf.len()` bytes at the current position.
    ///
    /// May return fewer bytes than requested. `Ok(0)` means end of object.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ObjectError>;

    /// Release the handle. Calling it more than once is a no-op.
    fn close(&mut self);
}

/// Where the objects live, detected from the endpoint URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// S3-compatible HTTP(S) endpoint
    S3(String),
    /// Local filesystem root
    Local(PathBuf),
}

impl Endpoint {
    /// Parse an endpoint URL, auto-detecting the backend
    ///
    /// - `http://` or `https://` -> S3
    /// - `file://` -> Local
    /// - Everything else is rejected
    pub fn parse(uri: &str) -> Result<Self, ObjectError> {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            Ok(Endpoint::S3(uri.to_string()))
        } else if let Some(path) = uri.strip_prefix("file://") {
            if path.is_empty() {
                return Err(ObjectError::Config(
                    "file:// endpoint must name a directory".to_string(),
                ));
            }
            Ok(Endpoint::Local(PathBuf::from(path)))
        } else {
            Err(ObjectError::Config(format!(
                "Unsupported endpoint '{uri}': expected http://, https:// or file://"
            )))
        }
    }

    /// Get a display name for logging
    pub fn display_name(&self) -> String {
        match self {
            Endpoint::S3(url) => url.clone(),
            Endpoint::Local(path) => format!("file://{}", path.display()),
        }
    }
}
