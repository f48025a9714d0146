//! The Chunk type - a verified, decoded chunk.

use bytes::Bytes;
use std::fmt;

use super::Checksum;
use crate::geometry::HEADER_LEN;

/// A decoded chunk with its position in the logical stream.
///
/// Chunks are produced by [`ChunkIter`](crate::ChunkIter) after their
/// checksum has been verified.
///
/// # Example
///
/// ```
/// use crcchunk::Chunk;
///
/// let chunk = Chunk::new(&b"hello world"[..], 0);
///
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.physical_len(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk payload.
    pub data: Bytes,

    /// The logical offset of the payload in the decoded stream.
    pub offset: u64,

    /// The checksum stored in the chunk header.
    pub checksum: Checksum,
}

impl Chunk {
    /// Creates a chunk at `offset`, computing its checksum.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        let data = data.into();
        let checksum = Checksum::of(&data);
        Self {
            data,
            offset,
            checksum,
        }
    }

    /// Returns the payload length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no payload.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the encoded length including the header.
    pub fn physical_len(&self) -> usize {
        HEADER_LEN + self.data.len()
    }

    /// Returns the logical start offset.
    pub fn start(&self) -> u64 {
        self.offset
    }

    /// Returns the logical end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a logical range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.start()..self.end()
    }

    /// Appends the physical encoding of the chunk to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.checksum.to_le_bytes());
        out.extend_from_slice(&self.data);
    }

    /// Consumes the chunk and returns the payload.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk({} bytes @ {}, crc={})",
            self.len(),
            self.offset,
            self.checksum
        )
    }
}
