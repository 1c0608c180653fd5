//! Stream provider trait definition.

use crate::error::{StorageError, StorageResult};
use crate::stream::StorageStream;
use std::sync::Arc;

/// A factory and cache mapping stream names to live streams.
///
/// A provider is bound to one root location and exclusively owns every
/// stream it creates. For a given provider instance, repeated requests for
/// the same name always yield the same logical stream, so no two handles to
/// the same backing resource are ever open concurrently within one
/// provider.
///
/// # Lifecycle
///
/// A provider moves linearly from open to released; there is no way back.
/// [`release`](StreamProvider::release) is the contractual cleanup path and
/// the only one that reports close failures. Implementations also close
/// their streams on `Drop` so an abandoned provider does not leak handles,
/// but that path only logs failures and must not be relied on by
/// correctness-critical code.
///
/// # Thread safety
///
/// `get_stream` takes `&mut self`: a provider is a single-threaded object,
/// and callers sharing one across threads must serialize access
/// externally.
pub trait StreamProvider: Send {
    /// Returns the stream named `name`, creating it on first request.
    ///
    /// The backing resource lives at `<root>/<name>` and is created if
    /// absent; pre-existing content is never truncated. Subsequent calls
    /// with the same name return a handle to the same cached stream.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `name` is empty or would escape the provider root
    ///   ([`StorageError::InvalidStreamName`])
    /// - The provider has been released ([`StorageError::Released`])
    /// - The backing resource cannot be created or opened
    fn get_stream(&mut self, name: &str) -> StorageResult<Arc<dyn StorageStream>>;

    /// Closes every cached stream exactly once and clears the cache.
    ///
    /// Best-effort: a failure closing one stream does not prevent closing
    /// the rest; every failure is logged and the first is returned as
    /// [`StorageError::Release`]. Calling `release` on an already-released
    /// provider is a no-op `Ok`.
    fn release(&mut self) -> StorageResult<()>;
}

/// Checks that `name` is usable as a stream name.
///
/// The backing resource must live directly under the provider root, so the
/// name must be non-empty and free of path separators and traversal
/// components.
pub(crate) fn validate_stream_name(name: &str) -> StorageResult<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(StorageError::InvalidStreamName(name.to_string()));
    }
    Ok(())
}
