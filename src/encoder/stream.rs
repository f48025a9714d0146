//! Encoding a source of known length.

use std::io::{Read, Write};

use bytes::Bytes;

use crate::buffer::ChunkBuffer;
use crate::chunk::{Checksum, seal};
use crate::error::CodecError;
use crate::geometry::{CHUNK_DATA_LEN, HEADER_LEN, chunk_count, encode_size};

/// Encodes exactly `size` bytes from `reader` into `writer`.
///
/// Every full [`CHUNK_DATA_LEN`] bytes of input become one full chunk; a
/// remainder becomes one shorter final chunk. `size == 0` writes nothing.
///
/// # Arguments
///
/// * `reader` - Source of the logical bytes; must yield at least `size`
/// * `writer` - Sink for the encoded chunks
/// * `size` - Number of logical bytes to encode
/// * `scratch` - Buffer to reuse, or `None` to allocate one for this call
///
/// # Errors
///
/// - [`CodecError::Source`] if `reader` fails or ends early
/// - [`CodecError::Sink`] if `writer` fails
///
/// # Example
///
/// ```
/// use crcchunk::{encode, encode_size};
///
/// let data = b"hello world";
/// let mut out = Vec::new();
/// encode(&mut &data[..], &mut out, data.len() as u64, None)?;
///
/// assert_eq!(out.len() as u64, encode_size(11));
/// assert_eq!(&out[4..], data);
/// # Ok::<(), crcchunk::CodecError>(())
/// ```
pub fn encode<R, W>(
    reader: &mut R,
    writer: &mut W,
    size: u64,
    scratch: Option<&mut ChunkBuffer>,
) -> Result<(), CodecError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    if size == 0 {
        return Ok(());
    }
    ChunkBuffer::scoped(scratch, |chunk| encode_with(reader, writer, size, chunk))
}

pub(crate) fn encode_with<R, W>(
    reader: &mut R,
    writer: &mut W,
    mut size: u64,
    chunk: &mut ChunkBuffer,
) -> Result<(), CodecError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    tracing::debug!(size, chunks = chunk_count(size), "encoding stream");

    while size > 0 {
        let len = size.min(CHUNK_DATA_LEN as u64) as usize;
        let frame = &mut chunk[..HEADER_LEN + len];

        reader
            .read_exact(&mut frame[HEADER_LEN..])
            .map_err(CodecError::Source)?;
        seal(frame);
        writer.write_all(frame).map_err(CodecError::Sink)?;

        size -= len as u64;
    }
    Ok(())
}

/// Encodes an in-memory buffer.
///
/// ```
/// use crcchunk::{decode_bytes, encode_bytes};
///
/// let encoded = encode_bytes(b"some data");
/// assert_eq!(decode_bytes(&encoded)?.as_ref(), b"some data");
/// # Ok::<(), crcchunk::CodecError>(())
/// ```
pub fn encode_bytes(data: &[u8]) -> Bytes {
    let mut out = Vec::with_capacity(encode_size(data.len() as u64) as usize);
    for payload in data.chunks(CHUNK_DATA_LEN) {
        out.extend_from_slice(&Checksum::of(payload).to_le_bytes());
        out.extend_from_slice(payload);
    }
    Bytes::from(out)
}
