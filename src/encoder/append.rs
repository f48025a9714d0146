//! Appending to an encoded stream held in a random-access store.

use std::io::Read;

use super::encode_with;
use crate::access::{OffsetWriter, ReadAt, WriteAt};
use crate::buffer::ChunkBuffer;
use crate::chunk::Checksum;
use crate::decoder::chunk_decoder;
use crate::error::CodecError;
use crate::geometry::{
    CHUNK_DATA_LEN, HEADER_LEN, chunk_index, chunk_start, encode_size, offset_in_chunk,
};

/// Appends `size` bytes from `reader` to the encoded stream in `store`.
///
/// Full chunks already in the store are left untouched. If the last chunk is
/// partial, its payload is read back and verified, the new bytes are written
/// after it, and its header is rewritten to cover the longer payload. Any
/// remaining bytes become new chunks.
///
/// The patched chunk's header is written last, after all new bytes. If the
/// call fails or is interrupted before that, the old header still matches
/// the old payload length, so the stream still decodes at its old size;
/// a torn header write is caught as a checksum mismatch instead of being
/// read as valid data.
///
/// Callers must serialize appends to the same stream.
///
/// # Arguments
///
/// * `store` - Store holding the encoded stream
/// * `base` - Offset of the encoded stream within the store
/// * `fsize` - Logical size already encoded (not counting checksums)
/// * `reader` - Source of the new bytes
/// * `size` - Number of bytes to append
/// * `scratch` - Buffer to reuse, or `None` to allocate one for this call
///
/// # Errors
///
/// - [`CodecError::Source`] if `reader` fails or ends early
/// - [`CodecError::Sink`] if the store fails a write, or fails to give back
///   the partial last chunk
/// - an integrity fault if the partial last chunk fails verification
///
/// # Example
///
/// ```
/// use crcchunk::{MemStore, append_encode, decode_bytes};
///
/// let mut store = MemStore::new();
/// append_encode(&mut store, 0, 0, &mut &b"hello "[..], 6, None)?;
/// append_encode(&mut store, 0, 6, &mut &b"world"[..], 5, None)?;
///
/// assert_eq!(decode_bytes(store.as_slice())?.as_ref(), b"hello world");
/// # Ok::<(), crcchunk::CodecError>(())
/// ```
pub fn append_encode<S, R>(
    store: &mut S,
    base: u64,
    fsize: u64,
    reader: &mut R,
    size: u64,
    scratch: Option<&mut ChunkBuffer>,
) -> Result<(), CodecError>
where
    S: ReadAt + WriteAt + ?Sized,
    R: Read + ?Sized,
{
    ChunkBuffer::scoped(scratch, |chunk| {
        append_with(store, base, fsize, reader, size, chunk)
    })
}

fn append_with<S, R>(
    store: &mut S,
    base: u64,
    fsize: u64,
    reader: &mut R,
    mut size: u64,
    chunk: &mut ChunkBuffer,
) -> Result<(), CodecError>
where
    S: ReadAt + WriteAt + ?Sized,
    R: Read + ?Sized,
{
    let mut offset = base + encode_size(fsize);
    let mut pending_header = None;

    let old = offset_in_chunk(fsize);
    if old > 0 {
        let header_pos = base + chunk_start(chunk_index(fsize));
        recover_tail(&*store, base, fsize, old, chunk)?;

        let add = (CHUNK_DATA_LEN - old).min(usize::try_from(size).unwrap_or(usize::MAX));
        let start = HEADER_LEN + old;
        let patch = &mut chunk[start..start + add];
        reader.read_exact(patch).map_err(CodecError::Source)?;
        store
            .write_all_at(patch, offset)
            .map_err(CodecError::Sink)?;

        let sum = Checksum::of(&chunk[HEADER_LEN..start + add]);
        pending_header = Some((sum, header_pos));

        tracing::debug!(old, add, header_pos, "patched partial chunk");
        size -= add as u64;
        offset += add as u64;
    }

    if size > 0 {
        let mut writer = OffsetWriter::new(&mut *store, offset);
        encode_with(reader, &mut writer, size, chunk)?;
    }

    if let Some((sum, pos)) = pending_header {
        store
            .write_all_at(&sum.to_le_bytes(), pos)
            .map_err(CodecError::Sink)?;
    }
    Ok(())
}

/// Reads back and verifies the `old` payload bytes of the partial last
/// chunk, leaving them at `[HEADER_LEN, HEADER_LEN + old)` of `chunk`.
fn recover_tail<S>(
    store: &S,
    base: u64,
    fsize: u64,
    old: usize,
    chunk: &mut ChunkBuffer,
) -> Result<(), CodecError>
where
    S: ReadAt + ?Sized,
{
    let mut dec = chunk_decoder(store, base, fsize - old as u64, fsize, &mut *chunk);
    let n = dec.fetch().map_err(|e| match e {
        CodecError::Source(e) => CodecError::Sink(e),
        other => other,
    })?;
    if n < old {
        return Err(CodecError::Sink(std::io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(())
}
