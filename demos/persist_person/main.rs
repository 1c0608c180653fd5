//! FolioDB Storage Example - Persist One Record
//!
//! This example demonstrates the storage stream stack end to end:
//! - Selecting a storage medium through the `Platform` seam
//! - Obtaining named streams from a `StreamProvider`
//! - Durable offset-addressed writes and reads
//! - Releasing a provider and reopening the same root
//!
//! The record framing below (length prefix + CBOR payload) stands in for
//! the database engine that would normally sit on top of this layer.
//!
//! Run with: cargo run -p persist_person [data-dir]

use foliodb_storage::{FileSystemPlatform, Platform, StorageStream};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The record persisted by this example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Person {
    id: String,
    first_name: String,
    surname: String,
    addresses: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Address {
    id: String,
    city: String,
}

/// Stream holding person records.
const PERSONS_STREAM: &str = "persons.dat";

/// Width of the record length prefix.
const HEADER_LEN: usize = 4;

/// Writes `person` at address 0 as a length-prefixed CBOR record.
fn persist(stream: &dyn StorageStream, person: &Person) -> Result<(), Box<dyn std::error::Error>> {
    let mut payload = Vec::new();
    ciborium::into_writer(person, &mut payload)?;

    let mut record = (payload.len() as u32).to_le_bytes().to_vec();
    record.extend_from_slice(&payload);

    // One write call: the record is durable when this returns.
    stream.write(0, &record)?;
    Ok(())
}

/// Reads the record back from address 0.
fn find(stream: &dyn StorageStream) -> Result<Person, Box<dyn std::error::Error>> {
    let header = stream.read(0, HEADER_LEN)?;
    let length = u32::from_le_bytes(header.as_slice().try_into()?);

    let payload = stream.read(HEADER_LEN as u64, length as usize)?;
    Ok(ciborium::from_reader(payload.as_slice())?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("Persist One Record Example");
    println!("==========================\n");

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("foliodb-persist-person"));

    // The platform is the only place that names a storage medium; everything
    // below this line would work unchanged against another platform.
    let platform = FileSystemPlatform;

    // First session: persist Jon.
    let mut provider = platform.create_storage_stream_provider(&data_dir)?;
    let persons = provider.get_stream(PERSONS_STREAM)?;

    let jon = Person {
        id: "123".to_string(),
        first_name: "Jon".to_string(),
        surname: "Snow".to_string(),
        addresses: vec![
            Address {
                id: "1".to_string(),
                city: "Castle Black".to_string(),
            },
            Address {
                id: "2".to_string(),
                city: "Winterfell".to_string(),
            },
        ],
    };

    persist(persons.as_ref(), &jon)?;
    println!("[OK] Persisted {} {}", jon.first_name, jon.surname);
    provider.release()?;
    println!("[OK] Released provider");

    // Second session over the same root: the record survived.
    let mut provider = platform.create_storage_stream_provider(&data_dir)?;
    let persons = provider.get_stream(PERSONS_STREAM)?;

    let found = find(persons.as_ref())?;
    if found != jon {
        return Err("reloaded record does not match what was persisted".into());
    }
    println!(
        "[OK] Found {} {} ({} addresses)",
        found.first_name,
        found.surname,
        found.addresses.len()
    );
    provider.release()?;

    println!("\nData directory: {}", data_dir.display());
    Ok(())
}
