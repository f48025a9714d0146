//! Sealing and verification of physical chunks.
//!
//! A physical chunk is `checksum(4, LE) || payload`. These helpers work on a
//! slice holding exactly one physical chunk.

use super::Checksum;
use crate::error::CodecError;
use crate::geometry::HEADER_LEN;

/// Computes the checksum of the payload and writes it into the header.
pub(crate) fn seal(chunk: &mut [u8]) -> Checksum {
    let sum = Checksum::of(&chunk[HEADER_LEN..]);
    sum.write_header(chunk);
    sum
}

/// Verifies a physical chunk and returns its checksum.
///
/// A chunk must carry a header and at least one payload byte.
pub(crate) fn verify(chunk: &[u8]) -> Result<Checksum, CodecError> {
    let stored = match Checksum::from_header(chunk) {
        Some(sum) if chunk.len() > HEADER_LEN => sum,
        _ => {
            tracing::warn!(len = chunk.len(), "malformed chunk");
            return Err(CodecError::MalformedChunk { len: chunk.len() });
        }
    };

    let actual = Checksum::of(&chunk[HEADER_LEN..]);
    if stored != actual {
        tracing::warn!(
            len = chunk.len(),
            expected = %stored,
            actual = %actual,
            "chunk checksum mismatch"
        );
        return Err(CodecError::ChecksumMismatch {
            expected: stored.value(),
            actual: actual.value(),
        });
    }
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_then_verify() {
        let mut chunk = *b"\0\0\0\0payload";
        let sum = seal(&mut chunk);
        assert_eq!(verify(&chunk).unwrap(), sum);
    }

    #[test]
    fn test_verify_detects_payload_damage() {
        let mut chunk = *b"\0\0\0\0payload";
        seal(&mut chunk);
        chunk[6] ^= 0x01;
        assert!(matches!(
            verify(&chunk),
            Err(CodecError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_verify_detects_header_damage() {
        let mut chunk = *b"\0\0\0\0payload";
        seal(&mut chunk);
        chunk[0] ^= 0x80;
        assert!(verify(&chunk).unwrap_err().is_integrity());
    }

    #[test]
    fn test_header_only_chunk_is_malformed() {
        let chunk = Checksum::of(b"").to_le_bytes();
        assert!(matches!(
            verify(&chunk),
            Err(CodecError::MalformedChunk { len: 4 })
        ));
        assert!(matches!(
            verify(&[1, 2]),
            Err(CodecError::MalformedChunk { len: 2 })
        ));
    }
}
