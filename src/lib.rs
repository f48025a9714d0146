//! crcchunk
//!
//! Chunked, self-checksumming byte streams.
//!
//! `crcchunk` splits a byte stream into fixed 64 KiB physical chunks, each a
//! 4-byte little-endian CRC32 (IEEE) of its payload followed by up to 65532
//! payload bytes. Every chunk is verified before any of its bytes are
//! returned. It is meant for:
//!
//! - append-only data files that must detect bit rot
//! - random reads of a logical range without decoding the whole file
//! - streaming data through a pipe with end-to-end checksums
//!
//! The crate intentionally:
//! - does NOT repair or skip damaged chunks
//! - does NOT compress, encrypt or version the format
//! - does NOT lock concurrent appends
//!
//! # Encode and decode
//!
//! ```
//! use std::io::Read;
//! use crcchunk::{Decoder, encode, encode_size};
//!
//! let data = b"hello world";
//! let mut encoded = Vec::new();
//! encode(&mut &data[..], &mut encoded, data.len() as u64, None)?;
//! assert_eq!(encoded.len() as u64, encode_size(data.len() as u64));
//!
//! let mut out = Vec::new();
//! Decoder::new(&encoded[..], data.len() as u64, None).read_to_end(&mut out)?;
//! assert_eq!(out, data);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Append and random reads
//!
//! ```no_run
//! use std::fs::OpenOptions;
//! use std::io::Read;
//! use crcchunk::{EncodedStore, StoreConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = OpenOptions::new().read(true).write(true).create(true).open("data.crc")?;
//!     let mut store = EncodedStore::open(file, StoreConfig::default())?;
//!
//!     store.append_bytes(b"first record\n")?;
//!     store.append_bytes(b"second record\n")?;
//!
//!     let mut line = String::new();
//!     store.reader(13, 27)?.read_to_string(&mut line)?;
//!     assert_eq!(line, "second record\n");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod access;
mod chunk;
mod config;
mod decoder;
mod encoder;
mod error;
pub mod geometry;
mod store;

mod buffer; // internal (scratch chunk)
mod hash; // internal crc32 state
mod util; // internal read helpers

//
// Public surface
//

pub use access::{MemStore, OffsetWriter, ReadAt, StoreSection, WriteAt};
pub use buffer::ChunkBuffer;
pub use chunk::{Checksum, Chunk};
pub use config::StoreConfig;
pub use decoder::{
    ChunkIter, Decoder, FramingDecoder, RangeDecoder, SectionView, decode_bytes, decode_range,
    range_decoder,
};
pub use encoder::{FrameWriter, FramingEncoder, append_encode, encode, encode_bytes};
pub use error::CodecError;
pub use geometry::{CHUNK_DATA_LEN, CHUNK_PHYS_LEN, HEADER_LEN, decode_size, encode_size};
pub use store::EncodedStore;
