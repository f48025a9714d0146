//! CRC32-based chunk checksumming.

use crate::chunk::Checksum;

/// A hasher that computes CRC32-IEEE checksums incrementally.
#[derive(Debug, Clone, Default)]
pub(crate) struct Crc32Hasher {
    state: crc32fast::Hasher,
    len: usize,
}

impl Crc32Hasher {
    /// Creates a new hasher.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Updates the hasher with more data.
    pub(crate) fn update(&mut self, data: &[u8]) {
        self.state.update(data);
        self.len += data.len();
    }

    /// Number of bytes hashed since the last reset.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns the checksum of everything hashed so far.
    pub(crate) fn finalize(&self) -> Checksum {
        Checksum::new(self.state.clone().finalize())
    }

    /// Resets the hasher to its initial state.
    pub(crate) fn reset(&mut self) {
        self.state.reset();
        self.len = 0;
    }
}
