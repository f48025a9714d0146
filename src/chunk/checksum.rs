//! Chunk checksum type.

use std::fmt;

use crate::geometry::HEADER_LEN;

/// A CRC32-IEEE checksum of a chunk payload.
///
/// Stored little-endian in the first [`HEADER_LEN`] bytes of every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Checksum(u32);

impl Checksum {
    /// The size of the checksum in bytes.
    pub const SIZE: usize = HEADER_LEN;

    /// Creates a checksum from a raw value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Computes the checksum of a payload.
    pub fn of(payload: &[u8]) -> Self {
        Self(crc32fast::hash(payload))
    }

    /// Reads the checksum stored in a chunk header.
    ///
    /// Returns `None` if `chunk` is shorter than the header.
    pub fn from_header(chunk: &[u8]) -> Option<Self> {
        let header: [u8; HEADER_LEN] = chunk.get(..HEADER_LEN)?.try_into().ok()?;
        Some(Self(u32::from_le_bytes(header)))
    }

    /// Writes the checksum into the header of `chunk`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk` is shorter than the header.
    pub fn write_header(&self, chunk: &mut [u8]) {
        chunk[..HEADER_LEN].copy_from_slice(&self.to_le_bytes());
    }

    /// Returns the raw checksum value.
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns the header encoding of the checksum.
    pub const fn to_le_bytes(&self) -> [u8; HEADER_LEN] {
        self.0.to_le_bytes()
    }

    /// Returns the checksum as an 8-character hex string.
    pub fn to_hex(&self) -> String {
        format!("{:08x}", self.0)
    }
}

impl From<u32> for Checksum {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Checksum> for u32 {
    fn from(sum: Checksum) -> Self {
        sum.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
