//! In-memory streams for testing and ephemeral storage.

use crate::error::{StorageError, StorageResult};
use crate::provider::{validate_stream_name, StreamProvider};
use crate::stream::StorageStream;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// An in-memory storage stream.
///
/// Holds its whole extent in a byte vector. Suitable for unit tests,
/// integration tests, and ephemeral databases; nothing survives the
/// process, so the durable-write guarantee degrades to "visible to every
/// later read in this process".
///
/// Sparse writes past the current extent grow the vector with explicit
/// zeros, matching the file backend's gap policy.
#[derive(Debug)]
pub struct InMemoryStream {
    data: RwLock<Option<Vec<u8>>>,
}

impl InMemoryStream {
    fn new() -> Self {
        Self {
            data: RwLock::new(Some(Vec::new())),
        }
    }

    /// Returns a copy of the stream's contents, or an empty vector once
    /// the stream has been closed.
    ///
    /// Useful for testing and debugging.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.read().clone().unwrap_or_default()
    }

    fn close(&self) {
        *self.data.write() = None;
    }
}

impl StorageStream for InMemoryStream {
    fn read(&self, address: u64, length: usize) -> StorageResult<Vec<u8>> {
        let guard = self.data.read();
        let data = guard.as_ref().ok_or(StorageError::Closed)?;

        let size = data.len() as u64;
        let end = address.saturating_add(length as u64);
        if address > size || end > size {
            return Err(StorageError::ReadPastEnd {
                address,
                length,
                size,
            });
        }

        let start = address as usize;
        Ok(data[start..start + length].to_vec())
    }

    fn write(&self, address: u64, bytes: &[u8]) -> StorageResult<()> {
        let mut guard = self.data.write();
        let data = guard.as_mut().ok_or(StorageError::Closed)?;

        if bytes.is_empty() {
            return Ok(());
        }

        let start = usize::try_from(address).map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "address exceeds the in-memory address space",
            )
        })?;
        let end = start.checked_add(bytes.len()).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "write extends past the maximum addressable offset",
            )
        })?;
        if end > data.len() {
            data.resize(end, 0);
        }
        data[start..end].copy_from_slice(bytes);

        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        let guard = self.data.read();
        let data = guard.as_ref().ok_or(StorageError::Closed)?;
        Ok(data.len() as u64)
    }
}

/// A stream provider keeping every stream in process memory.
///
/// Mirrors [`super::FileStreamProvider`]'s caching and lifecycle contract
/// without touching the file system. Closing an in-memory stream cannot
/// fail, so `release` always succeeds.
#[derive(Debug, Default)]
pub struct InMemoryStreamProvider {
    streams: HashMap<String, Arc<InMemoryStream>>,
    released: bool,
}

impl InMemoryStreamProvider {
    /// Creates a new provider with no streams.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StreamProvider for InMemoryStreamProvider {
    fn get_stream(&mut self, name: &str) -> StorageResult<Arc<dyn StorageStream>> {
        if self.released {
            return Err(StorageError::Released);
        }
        validate_stream_name(name)?;

        let stream = self
            .streams
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(InMemoryStream::new()));

        Ok(Arc::clone(stream) as Arc<dyn StorageStream>)
    }

    fn release(&mut self) -> StorageResult<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        for stream in self.streams.values() {
            stream.close();
        }
        self.streams.clear();

        debug!("released in-memory stream provider");
        Ok(())
    }
}

impl Drop for InMemoryStreamProvider {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> (InMemoryStreamProvider, Arc<dyn StorageStream>) {
        let mut provider = InMemoryStreamProvider::new();
        let stream = provider.get_stream("data.bin").unwrap();
        (provider, stream)
    }

    #[test]
    fn new_stream_is_empty() {
        let (_provider, stream) = stream();
        assert_eq!(stream.size().unwrap(), 0);
    }

    #[test]
    fn write_then_read_round_trip() {
        let (_provider, stream) = stream();

        stream.write(0, b"hello world").unwrap();

        assert_eq!(&stream.read(0, 5).unwrap(), b"hello");
        assert_eq!(&stream.read(6, 5).unwrap(), b"world");
    }

    #[test]
    fn non_overlapping_writes_do_not_corrupt() {
        let (_provider, stream) = stream();

        stream.write(0, b"CD").unwrap();
        stream.write(10, b"AB").unwrap();

        assert_eq!(&stream.read(0, 2).unwrap(), b"CD");
        assert_eq!(&stream.read(10, 2).unwrap(), b"AB");
    }

    #[test]
    fn write_past_extent_zero_fills_gap() {
        let (_provider, stream) = stream();

        stream.write(5, b"AB").unwrap();

        assert_eq!(stream.size().unwrap(), 7);
        assert_eq!(stream.read(0, 5).unwrap(), vec![0u8; 5]);
    }

    #[test]
    fn read_past_end_fails() {
        let (_provider, stream) = stream();
        stream.write(0, b"hello").unwrap();

        assert!(matches!(
            stream.read(10, 5),
            Err(StorageError::ReadPastEnd { .. })
        ));
        assert!(matches!(
            stream.read(3, 10),
            Err(StorageError::ReadPastEnd { .. })
        ));
    }

    #[test]
    fn empty_read_and_write() {
        let (_provider, stream) = stream();
        stream.write(0, b"hello").unwrap();

        assert!(stream.read(2, 0).unwrap().is_empty());

        stream.write(100, b"").unwrap();
        assert_eq!(stream.size().unwrap(), 5);
    }

    #[test]
    fn data_snapshots_contents() {
        let stream = InMemoryStream::new();
        stream.write(0, b"abc").unwrap();
        assert_eq!(stream.data(), b"abc");

        stream.close();
        assert!(stream.data().is_empty());
    }

    #[test]
    fn get_stream_aliases_same_stream() {
        let mut provider = InMemoryStreamProvider::new();
        let first = provider.get_stream("data.bin").unwrap();
        let second = provider.get_stream("data.bin").unwrap();

        first.write(0, b"shared").unwrap();
        assert_eq!(&second.read(0, 6).unwrap(), b"shared");
    }

    #[test]
    fn streams_are_independent_by_name() {
        let mut provider = InMemoryStreamProvider::new();
        let left = provider.get_stream("left.bin").unwrap();
        let right = provider.get_stream("right.bin").unwrap();

        left.write(0, b"left").unwrap();
        assert_eq!(right.size().unwrap(), 0);
    }

    #[test]
    fn release_is_idempotent() {
        let mut provider = InMemoryStreamProvider::new();
        provider.get_stream("data.bin").unwrap();

        provider.release().unwrap();
        provider.release().unwrap();
    }

    #[test]
    fn get_stream_after_release_fails() {
        let mut provider = InMemoryStreamProvider::new();
        provider.release().unwrap();

        assert!(matches!(
            provider.get_stream("data.bin"),
            Err(StorageError::Released)
        ));
    }

    #[test]
    fn streams_are_closed_by_release() {
        let (mut provider, stream) = stream();
        stream.write(0, b"hello").unwrap();

        provider.release().unwrap();

        assert!(matches!(stream.read(0, 5), Err(StorageError::Closed)));
        assert!(matches!(stream.write(0, b"x"), Err(StorageError::Closed)));
        assert!(matches!(stream.size(), Err(StorageError::Closed)));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn write_then_read_returns_written_bytes(
                address in 0u64..16 * 1024,
                bytes in prop::collection::vec(any::<u8>(), 1..256),
            ) {
                let (_provider, stream) = stream();

                stream.write(address, &bytes).unwrap();
                let data = stream.read(address, bytes.len()).unwrap();

                prop_assert_eq!(data, bytes);
            }
        }
    }
}
