//! Fixed-size chunk buffer.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::geometry::CHUNK_PHYS_LEN;

/// A reusable buffer holding exactly one physical chunk.
///
/// The length is always [`CHUNK_PHYS_LEN`]. A buffer of any other length is
/// a programming error and is rejected with a panic when it is converted.
///
/// # Example
///
/// ```
/// use crcchunk::{ChunkBuffer, CHUNK_PHYS_LEN};
///
/// let buf = ChunkBuffer::from_vec(vec![0u8; CHUNK_PHYS_LEN]);
/// assert_eq!(buf.len(), CHUNK_PHYS_LEN);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ChunkBuffer {
    data: Box<[u8]>,
}

impl ChunkBuffer {
    /// Allocates a zeroed buffer.
    pub fn new() -> Self {
        Self {
            data: vec![0u8; CHUNK_PHYS_LEN].into_boxed_slice(),
        }
    }

    /// Wraps an existing allocation.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != CHUNK_PHYS_LEN`.
    pub fn from_vec(data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            CHUNK_PHYS_LEN,
            "chunk buffer must be exactly {} bytes",
            CHUNK_PHYS_LEN
        );
        Self {
            data: data.into_boxed_slice(),
        }
    }

    /// Returns the underlying allocation.
    pub fn into_vec(self) -> Vec<u8> {
        self.data.into_vec()
    }

    /// Runs `f` with the caller's buffer, or with a fresh one for this call.
    pub(crate) fn scoped<T>(
        scratch: Option<&mut ChunkBuffer>,
        f: impl FnOnce(&mut ChunkBuffer) -> T,
    ) -> T {
        match scratch {
            Some(buf) => f(buf),
            None => f(&mut ChunkBuffer::new()),
        }
    }
}

impl Default for ChunkBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for ChunkBuffer {
    /// See [`ChunkBuffer::from_vec`].
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}

impl Deref for ChunkBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for ChunkBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl fmt::Debug for ChunkBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkBuffer")
            .field("len", &self.data.len())
            .finish()
    }
}
