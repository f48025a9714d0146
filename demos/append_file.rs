//! Appending records to an encoded file and reading them back by range.
//!
//! Run with:
//!     cargo run --example append_file -- /path/to/file

use std::env;
use std::fs::OpenOptions;
use std::io::Read;

use crcchunk::{EncodedStore, StoreConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "records.crc".to_string());

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)?;

    println!("Appending records to: {}\n", path);

    let mut store = EncodedStore::open(file, StoreConfig::default())?;
    let mut offsets = Vec::new();

    for i in 0..5000 {
        let record = format!("record {:>5}: {}\n", i, "x".repeat(i % 40));
        offsets.push((store.logical_size(), record.len() as u64));
        store.append_bytes(record.as_bytes())?;
    }

    println!(
        "Logical size: {} bytes, encoded size: {} bytes",
        store.logical_size(),
        store.encoded_size()
    );
    println!("Verified chunks: {}\n", store.verify()?);

    // Random access: read back a few records without decoding the rest
    for &i in &[0usize, 1234, 4999] {
        let (from, len) = offsets[i];
        let mut record = String::new();
        store.reader(from, from + len)?.read_to_string(&mut record)?;
        print!("{}", record);
    }

    Ok(())
}
