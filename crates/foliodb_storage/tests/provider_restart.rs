//! End-to-end tests: data written through one provider must be readable
//! through a fresh provider over the same root.

use foliodb_storage::{FileSystemPlatform, Platform};
use tempfile::tempdir;

#[test]
fn write_survives_provider_restart() {
    let dir = tempdir().unwrap();
    let platform = FileSystemPlatform;

    // First session: write one record.
    let mut provider = platform
        .create_storage_stream_provider(dir.path())
        .unwrap();
    let stream = provider.get_stream("data.bin").unwrap();
    stream.write(0, b"HELLO").unwrap();
    assert_eq!(&stream.read(0, 5).unwrap(), b"HELLO");
    provider.release().unwrap();

    // Second session over the same root: the bytes are still there.
    let mut provider = platform
        .create_storage_stream_provider(dir.path())
        .unwrap();
    let stream = provider.get_stream("data.bin").unwrap();
    assert_eq!(&stream.read(0, 5).unwrap(), b"HELLO");
    provider.release().unwrap();
}

#[test]
fn restart_preserves_extent_and_gaps() {
    let dir = tempdir().unwrap();
    let platform = FileSystemPlatform;

    let mut provider = platform
        .create_storage_stream_provider(dir.path())
        .unwrap();
    let stream = provider.get_stream("sparse.bin").unwrap();
    stream.write(64, b"tail").unwrap();
    provider.release().unwrap();

    let mut provider = platform
        .create_storage_stream_provider(dir.path())
        .unwrap();
    let stream = provider.get_stream("sparse.bin").unwrap();
    assert_eq!(stream.size().unwrap(), 68);
    assert_eq!(stream.read(0, 64).unwrap(), vec![0u8; 64]);
    assert_eq!(&stream.read(64, 4).unwrap(), b"tail");
    provider.release().unwrap();
}

#[test]
fn streams_with_different_names_stay_separate_across_restart() {
    let dir = tempdir().unwrap();
    let platform = FileSystemPlatform;

    let mut provider = platform
        .create_storage_stream_provider(dir.path())
        .unwrap();
    provider
        .get_stream("left.bin")
        .unwrap()
        .write(0, b"left")
        .unwrap();
    provider
        .get_stream("right.bin")
        .unwrap()
        .write(0, b"right")
        .unwrap();
    provider.release().unwrap();

    let mut provider = platform
        .create_storage_stream_provider(dir.path())
        .unwrap();
    assert_eq!(&provider.get_stream("left.bin").unwrap().read(0, 4).unwrap(), b"left");
    assert_eq!(&provider.get_stream("right.bin").unwrap().read(0, 5).unwrap(), b"right");
    provider.release().unwrap();
}
