//! Platform selection for storage stream providers.

use crate::error::StorageResult;
use crate::file::FileStreamProvider;
use crate::memory::InMemoryStreamProvider;
use crate::provider::StreamProvider;
use std::path::Path;

/// Strategy object producing a [`StreamProvider`] for a root location.
///
/// This is the single seam through which a database engine stays agnostic
/// of the physical storage medium: the engine is handed a `Platform` at
/// construction time and never names a concrete provider. Swapping the
/// file system for memory (or any future medium) happens here, without a
/// change to engine code.
pub trait Platform {
    /// Creates a stream provider bound to `root`.
    ///
    /// Pure factory: no state is retained across calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be constructed for `root`.
    fn create_storage_stream_provider(
        &self,
        root: &Path,
    ) -> StorageResult<Box<dyn StreamProvider>>;
}

/// Platform backed by the local file system.
///
/// Providers created here persist each stream as the file
/// `<root>/<name>`; the root directory is created if absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemPlatform;

impl Platform for FileSystemPlatform {
    fn create_storage_stream_provider(
        &self,
        root: &Path,
    ) -> StorageResult<Box<dyn StreamProvider>> {
        Ok(Box::new(FileStreamProvider::open(root)?))
    }
}

/// Platform keeping every stream in process memory.
///
/// Each call yields a fresh, empty provider; `root` is accepted for
/// interface parity and otherwise ignored. Nothing survives the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct InMemoryPlatform;

impl Platform for InMemoryPlatform {
    fn create_storage_stream_provider(
        &self,
        _root: &Path,
    ) -> StorageResult<Box<dyn StreamProvider>> {
        Ok(Box::new(InMemoryStreamProvider::new()))
    }
}
