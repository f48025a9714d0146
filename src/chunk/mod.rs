//! Chunk types.
//!
//! - [`Chunk`] - Verified chunk with payload, logical offset, checksum
//! - [`Checksum`] - CRC32-IEEE checksum stored in each chunk header

mod checksum;
mod data;
mod frame;

pub use checksum::Checksum;
pub use data::Chunk;
pub(crate) use frame::{seal, verify};
