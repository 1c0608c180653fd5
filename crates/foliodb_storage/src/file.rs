//! File-backed streams for persistent storage.

use crate::error::{StorageError, StorageResult};
use crate::provider::{validate_stream_name, StreamProvider};
use crate::stream::StorageStream;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// A file-backed storage stream.
///
/// One stream owns one open handle to its backing file for its whole life.
/// Every `write` is pushed through `sync_all`, so a successful return means
/// the bytes are on disk and survive an immediate crash of the process.
///
/// Streams are created through [`StreamProvider::get_stream`] and closed
/// by the provider's release; they cannot be constructed directly.
#[derive(Debug)]
pub struct FileStream {
    path: PathBuf,
    file: Mutex<Option<File>>,
    size: RwLock<u64>,
}

impl FileStream {
    /// Opens or creates the backing file at `path`.
    ///
    /// An existing file is opened for reading and writing without
    /// truncation.
    fn open(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let size = file.metadata()?.len();
        debug!(path = %path.display(), size, "opened file stream");

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(Some(file)),
            size: RwLock::new(size),
        })
    }

    /// Returns the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Closes the backing file, syncing it first.
    ///
    /// Idempotent: closing an already-closed stream is a no-op.
    fn close(&self) -> io::Result<()> {
        if let Some(file) = self.file.lock().take() {
            file.sync_all()?;
        }
        Ok(())
    }
}

impl StorageStream for FileStream {
    fn read(&self, address: u64, length: usize) -> StorageResult<Vec<u8>> {
        let mut guard = self.file.lock();
        let file = guard.as_mut().ok_or(StorageError::Closed)?;

        let size = *self.size.read();
        let end = address.saturating_add(length as u64);
        if address > size || end > size {
            return Err(StorageError::ReadPastEnd {
                address,
                length,
                size,
            });
        }

        if length == 0 {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(address))?;
        let mut buffer = vec![0u8; length];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    fn write(&self, address: u64, bytes: &[u8]) -> StorageResult<()> {
        let mut guard = self.file.lock();
        let file = guard.as_mut().ok_or(StorageError::Closed)?;

        if bytes.is_empty() {
            return Ok(());
        }

        let end = address.checked_add(bytes.len() as u64).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "write extends past the maximum addressable offset",
            )
        })?;

        file.seek(SeekFrom::Start(address))?;
        file.write_all(bytes)?;
        file.sync_all()?;

        let mut size = self.size.write();
        if end > *size {
            *size = end;
        }

        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        if self.file.lock().is_none() {
            return Err(StorageError::Closed);
        }
        Ok(*self.size.read())
    }
}

/// A stream provider backed by one directory on the local file system.
///
/// Each stream name maps to the file `<root>/<name>`, created on first
/// request and never truncated. The provider exclusively owns every stream
/// it opens; [`release`](StreamProvider::release) closes them all.
///
/// # Example
///
/// ```no_run
/// use foliodb_storage::{FileStreamProvider, StreamProvider};
/// use std::path::Path;
///
/// let mut provider = FileStreamProvider::open(Path::new("db")).unwrap();
/// let stream = provider.get_stream("data.bin").unwrap();
/// stream.write(0, b"HELLO").unwrap();
/// provider.release().unwrap();
/// ```
#[derive(Debug)]
pub struct FileStreamProvider {
    root: PathBuf,
    streams: HashMap<String, Arc<FileStream>>,
    released: bool,
}

impl FileStreamProvider {
    /// Opens a provider rooted at `root`, creating the directory if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be created.
    pub fn open(root: &Path) -> StorageResult<Self> {
        fs::create_dir_all(root)?;
        debug!(root = %root.display(), "opened file stream provider");

        Ok(Self {
            root: root.to_path_buf(),
            streams: HashMap::new(),
            released: false,
        })
    }

    /// Returns the root directory of this provider.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl StreamProvider for FileStreamProvider {
    fn get_stream(&mut self, name: &str) -> StorageResult<Arc<dyn StorageStream>> {
        if self.released {
            return Err(StorageError::Released);
        }
        validate_stream_name(name)?;

        if !self.streams.contains_key(name) {
            let stream = Arc::new(FileStream::open(&self.root.join(name))?);
            self.streams.insert(name.to_string(), stream);
        }

        let stream: Arc<dyn StorageStream> = self.streams[name].clone();
        Ok(stream)
    }

    fn release(&mut self) -> StorageResult<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let mut first_failure = None;
        for (name, stream) in self.streams.drain() {
            if let Err(source) = stream.close() {
                warn!(stream = %name, error = %source, "failed to close stream during release");
                if first_failure.is_none() {
                    first_failure = Some(StorageError::Release {
                        stream: name,
                        source,
                    });
                }
            }
        }

        debug!(root = %self.root.display(), "released file stream provider");
        match first_failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

impl Drop for FileStreamProvider {
    fn drop(&mut self) {
        // Safety net only. The explicit release path is the one that
        // surfaces close failures to the caller.
        if !self.released {
            if let Err(error) = self.release() {
                warn!(%error, "file stream provider dropped without release");
            }
        }
    }
}
