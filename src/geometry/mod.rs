//! Chunk geometry: the fixed layout constants and the size conversions
//! between logical (decoded) and physical (encoded) byte counts.
//!
//! These constants define the wire format. Changing any of them makes
//! previously encoded data unreadable.

/// log2 of the physical chunk length.
pub const CHUNK_BITS: u32 = 16;

/// Length of the checksum header at the start of every chunk.
pub const HEADER_LEN: usize = 4;

/// Physical length of a full chunk: header plus payload (64 KiB).
pub const CHUNK_PHYS_LEN: usize = 1 << CHUNK_BITS;

/// Payload length of a full chunk (64 KiB - 4).
pub const CHUNK_DATA_LEN: usize = CHUNK_PHYS_LEN - HEADER_LEN;

const DATA_LEN: u64 = CHUNK_DATA_LEN as u64;
const PHYS_LEN: u64 = CHUNK_PHYS_LEN as u64;
const HEADER: u64 = HEADER_LEN as u64;

/// Returns the encoded size of `logical` bytes of data.
///
/// ```
/// use crcchunk::{encode_size, CHUNK_DATA_LEN, CHUNK_PHYS_LEN};
///
/// assert_eq!(encode_size(0), 0);
/// assert_eq!(encode_size(1), 5);
/// assert_eq!(encode_size(CHUNK_DATA_LEN as u64), CHUNK_PHYS_LEN as u64);
/// ```
pub const fn encode_size(logical: u64) -> u64 {
    logical + HEADER * chunk_count(logical)
}

/// Returns the logical size of `physical` bytes of encoded data.
///
/// Exact inverse of [`encode_size`] on sizes it produces.
pub const fn decode_size(physical: u64) -> u64 {
    let chunks = physical.div_ceil(PHYS_LEN);
    physical - HEADER * chunks
}

/// Number of chunks needed to hold `logical` bytes.
pub const fn chunk_count(logical: u64) -> u64 {
    logical.div_ceil(DATA_LEN)
}

/// Index of the chunk holding the logical byte at `offset`.
pub const fn chunk_index(offset: u64) -> u64 {
    offset / DATA_LEN
}

/// Physical offset of chunk `index`, relative to the start of the stream.
pub const fn chunk_start(index: u64) -> u64 {
    index << CHUNK_BITS
}

/// Offset of the logical byte `offset` within its chunk's payload.
pub const fn offset_in_chunk(offset: u64) -> usize {
    (offset % DATA_LEN) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_constants() {
        assert_eq!(CHUNK_PHYS_LEN, 65536);
        assert_eq!(CHUNK_DATA_LEN, 65532);
    }

    #[test]
    fn test_encode_size_boundaries() {
        assert_eq!(encode_size(0), 0);
        assert_eq!(encode_size(1), 5);
        assert_eq!(encode_size(65531), 65535);
        assert_eq!(encode_size(65532), 65536);
        assert_eq!(encode_size(65533), 65536 + 5);
        assert_eq!(encode_size(3 * 65532), 3 * 65536);
    }

    #[test]
    fn test_decode_size_boundaries() {
        assert_eq!(decode_size(0), 0);
        assert_eq!(decode_size(5), 1);
        assert_eq!(decode_size(65536), 65532);
        assert_eq!(decode_size(65541), 65533);
    }

    #[test]
    fn test_chunk_arithmetic() {
        assert_eq!(chunk_count(0), 0);
        assert_eq!(chunk_count(1), 1);
        assert_eq!(chunk_count(65532), 1);
        assert_eq!(chunk_count(65533), 2);

        assert_eq!(chunk_index(65531), 0);
        assert_eq!(chunk_index(65532), 1);
        assert_eq!(chunk_start(2), 131072);
        assert_eq!(offset_in_chunk(65533), 1);
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(n in 0u64..(1u64 << 48)) {
            prop_assert_eq!(decode_size(encode_size(n)), n);
        }

        #[test]
        fn encode_is_monotonic(n in 0u64..(1u64 << 40)) {
            prop_assert!(encode_size(n + 1) > encode_size(n));
        }
    }
}
