//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error reported by the backing medium.
    ///
    /// Never retried or rewrapped; the medium's failure reaches the caller
    /// as-is.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream name is empty or would place the backing resource
    /// outside the provider root.
    #[error("invalid stream name: {0:?}")]
    InvalidStreamName(String),

    /// Attempted to read beyond the current extent of the stream.
    #[error("read past end of stream: address {address}, length {length}, size {size}")]
    ReadPastEnd {
        /// The requested read address.
        address: u64,
        /// The requested read length.
        length: usize,
        /// The current stream extent.
        size: u64,
    },

    /// The stream has been closed by its provider.
    #[error("stream is closed")]
    Closed,

    /// The provider has already been released.
    #[error("stream provider already released")]
    Released,

    /// A stream failed to close during provider release.
    ///
    /// Release is best-effort: remaining streams are still closed, and the
    /// first failure is reported through this variant.
    #[error("failed to release stream {stream:?}: {source}")]
    Release {
        /// Name of the stream that failed to close.
        stream: String,
        /// The underlying close failure.
        source: io::Error,
    },
}
