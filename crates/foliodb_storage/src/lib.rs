//! # FolioDB Storage
//!
//! Storage stream abstraction and backends for FolioDB.
//!
//! This crate provides the lowest-level storage abstraction for FolioDB:
//! named, randomly addressable byte streams behind a pluggable platform
//! seam. Streams are **opaque byte spaces** - they do not interpret the
//! data they store.
//!
//! ## Design Principles
//!
//! - Streams are flat byte spaces with offset-based read and write
//! - Every successful write is durable before the call returns
//! - A provider owns its streams: one live stream per name, released
//!   together, exactly once
//! - The database engine selects a medium only through [`Platform`]
//!
//! ## Available Platforms
//!
//! - [`FileSystemPlatform`] - persistent storage, one file per stream
//! - [`InMemoryPlatform`] - for testing and ephemeral storage
//!
//! ## Example
//!
//! ```rust
//! use foliodb_storage::{InMemoryPlatform, Platform};
//! use std::path::Path;
//!
//! let platform = InMemoryPlatform;
//! let mut provider = platform
//!     .create_storage_stream_provider(Path::new("unused"))
//!     .unwrap();
//!
//! let stream = provider.get_stream("data.bin").unwrap();
//! stream.write(0, b"hello").unwrap();
//! assert_eq!(stream.read(0, 5).unwrap(), b"hello");
//!
//! provider.release().unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod platform;
mod provider;
mod stream;

pub use error::{StorageError, StorageResult};
pub use file::{FileStream, FileStreamProvider};
pub use memory::{InMemoryStream, InMemoryStreamProvider};
pub use platform::{FileSystemPlatform, InMemoryPlatform, Platform};
pub use provider::StreamProvider;
pub use stream::StorageStream;
