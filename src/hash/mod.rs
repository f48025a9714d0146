//! Incremental checksum computation.
//!
//! - [`Crc32Hasher`] - CRC32-IEEE hasher fed in pieces, used where a chunk
//!   payload arrives in several writes

mod crc32;

pub(crate) use crc32::Crc32Hasher;
