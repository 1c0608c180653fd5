//! Storage stream trait definition.

use crate::error::StorageResult;

/// A single named, randomly addressable byte-storage unit.
///
/// Streams are **opaque byte spaces**. They expose offset-based read and
/// write over a flat, sparse, linearly addressed extent and impose no
/// framing, header, or metadata of their own; byte layout above the raw
/// address space belongs entirely to the database engine driving them.
///
/// # Invariants
///
/// - `write(a, b)` followed by `read(a, b.len())` returns exactly `b`
/// - once `write` returns, the bytes are durable: they survive an immediate
///   crash of the writing process and are visible to any later stream
///   opened over the same backing resource
/// - a stream stays open and exclusively bound to its backing resource
///   until its provider releases it, and is released exactly once
///
/// # Implementors
///
/// - [`super::FileStream`] - persistent, file-backed
/// - [`super::InMemoryStream`] - ephemeral, for tests
pub trait StorageStream: Send + Sync {
    /// Reads exactly `length` bytes starting at `address`.
    ///
    /// A read extending past the current extent does not short-read or
    /// zero-fill; it fails loudly so the caller never receives fabricated
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The range `address..address + length` extends beyond the current
    ///   extent ([`StorageError::ReadPastEnd`])
    /// - The stream has been closed ([`StorageError::Closed`])
    /// - An I/O error occurs
    ///
    /// [`StorageError::ReadPastEnd`]: super::StorageError::ReadPastEnd
    /// [`StorageError::Closed`]: super::StorageError::Closed
    fn read(&self, address: u64, length: usize) -> StorageResult<Vec<u8>>;

    /// Writes the full byte sequence at `address`, durably.
    ///
    /// Blocks until the backing medium confirms the data is committed to
    /// stable storage. Writing past the current extent grows the stream
    /// sparsely; bytes in the gap read back as zeros.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The stream has been closed ([`StorageError::Closed`])
    /// - The medium rejects the write (permission, device error,
    ///   exhausted space)
    ///
    /// [`StorageError::Closed`]: super::StorageError::Closed
    fn write(&self, address: u64, bytes: &[u8]) -> StorageResult<()>;

    /// Returns the current extent of the stream in bytes.
    ///
    /// This is one past the highest address ever written.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream has been closed.
    fn size(&self) -> StorageResult<u64>;
}
