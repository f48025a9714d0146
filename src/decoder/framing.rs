//! Self-framing decoding for streams of unknown length.

use std::io::{self, Read};

use bytes::Bytes;

use super::fault::Fault;
use crate::buffer::ChunkBuffer;
use crate::chunk::{Checksum, Chunk, verify};
use crate::error::CodecError;
use crate::geometry::{CHUNK_PHYS_LEN, HEADER_LEN, decode_size};
use crate::util::read_full;

/// Reads the next physical chunk into `chunk` and verifies it.
///
/// Returns `None` at a clean end of stream.
fn next_frame<R: Read + ?Sized>(
    reader: &mut R,
    chunk: &mut [u8],
) -> Result<Option<(Checksum, usize)>, CodecError> {
    let n = read_full(reader, chunk).map_err(CodecError::Source)?;
    if n == 0 {
        return Ok(None);
    }
    let sum = verify(&chunk[..n])?;
    Ok(Some((sum, n)))
}

/// A reader that decodes an encoded stream until its source is exhausted.
///
/// Each read of the source fills up to one full physical chunk. A chunk of
/// four bytes or fewer cannot hold a checksum and a payload byte and is
/// reported as [`CodecError::MalformedChunk`].
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use crcchunk::{FramingDecoder, encode_bytes};
///
/// let encoded = encode_bytes(b"hello world");
/// let mut out = Vec::new();
/// FramingDecoder::new(&encoded[..], None).read_to_end(&mut out)?;
///
/// assert_eq!(out, b"hello world");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct FramingDecoder<R> {
    reader: R,
    chunk: ChunkBuffer,
    off: usize,
    len: usize,
    finished: bool,
    fault: Option<Fault>,
}

impl<R: Read> FramingDecoder<R> {
    /// Creates a decoder over `reader`, allocating a buffer if `scratch` is
    /// `None`.
    pub fn new(reader: R, scratch: Option<ChunkBuffer>) -> Self {
        Self {
            reader,
            chunk: scratch.unwrap_or_default(),
            off: 0,
            len: 0,
            finished: false,
            fault: None,
        }
    }

    /// Returns the source and the scratch buffer.
    pub fn into_parts(self) -> (R, ChunkBuffer) {
        (self.reader, self.chunk)
    }

    fn fetch(&mut self) -> Result<(), CodecError> {
        match next_frame(&mut self.reader, &mut self.chunk) {
            Ok(Some((_, n))) => {
                self.off = HEADER_LEN;
                self.len = n;
                Ok(())
            }
            Ok(None) => {
                self.finished = true;
                self.off = 0;
                self.len = 0;
                Ok(())
            }
            Err(e) => {
                self.fault = Some(Fault::record(&e));
                Err(e)
            }
        }
    }
}

impl<R: Read> Read for FramingDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.off == self.len {
            if let Some(fault) = self.fault {
                return Err(fault.to_io());
            }
            if self.finished {
                return Ok(0);
            }
            self.fetch()?;
        }

        let n = buf.len().min(self.len - self.off);
        buf[..n].copy_from_slice(&self.chunk[self.off..self.off + n]);
        self.off += n;
        Ok(n)
    }
}

/// An iterator over the verified chunks of an encoded stream.
///
/// Framing follows the same rules as [`FramingDecoder`]. Each chunk carries
/// its logical offset. Iteration ends after the first error.
///
/// # Example
///
/// ```
/// use crcchunk::{ChunkIter, encode_bytes};
///
/// let encoded = encode_bytes(&vec![7u8; 100_000]);
/// let chunks = ChunkIter::new(&encoded[..]).collect::<Result<Vec<_>, _>>()?;
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[1].offset, 65532);
/// # Ok::<(), crcchunk::CodecError>(())
/// ```
#[derive(Debug)]
pub struct ChunkIter<R> {
    reader: R,
    chunk: ChunkBuffer,
    offset: u64,
    finished: bool,
}

impl<R: Read> ChunkIter<R> {
    /// Creates an iterator over the chunks encoded in `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            chunk: ChunkBuffer::new(),
            offset: 0,
            finished: false,
        }
    }

    /// Returns the logical offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl<R: Read> Iterator for ChunkIter<R> {
    type Item = Result<Chunk, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match next_frame(&mut self.reader, &mut self.chunk) {
            Ok(Some((checksum, n))) => {
                let data = Bytes::copy_from_slice(&self.chunk[HEADER_LEN..n]);
                let chunk = Chunk {
                    data,
                    offset: self.offset,
                    checksum,
                };
                self.offset = chunk.end();
                Some(Ok(chunk))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Decodes an in-memory encoded buffer.
///
/// # Errors
///
/// Returns an integrity fault if any chunk fails verification.
pub fn decode_bytes(encoded: &[u8]) -> Result<Bytes, CodecError> {
    let mut out = Vec::with_capacity(decode_size(encoded.len() as u64) as usize);
    for chunk in encoded.chunks(CHUNK_PHYS_LEN) {
        verify(chunk)?;
        out.extend_from_slice(&chunk[HEADER_LEN..]);
    }
    Ok(Bytes::from(out))
}
