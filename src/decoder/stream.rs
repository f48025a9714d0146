//! Decoding a stream of known logical length.

use std::borrow::BorrowMut;
use std::io::{self, Read};

use super::fault::Fault;
use crate::buffer::ChunkBuffer;
use crate::chunk::verify;
use crate::error::CodecError;
use crate::geometry::{CHUNK_PHYS_LEN, HEADER_LEN};
use crate::util::read_at_least;

/// A reader that decodes `size` logical bytes from an encoded stream.
///
/// Bytes of a chunk are handed out only after its checksum has been
/// verified. A failure is sticky: once a read has failed, every later read
/// fails the same way. Integrity faults arrive as [`io::Error`]s of kind
/// [`io::ErrorKind::InvalidData`]; [`CodecError::from_io`] recovers them.
///
/// The buffer parameter `B` is [`ChunkBuffer`] for decoders created with
/// [`Decoder::new`]; the crate also drives decoders over borrowed buffers.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use crcchunk::{Decoder, encode_bytes};
///
/// let encoded = encode_bytes(b"hello world");
/// let mut dec = Decoder::new(&encoded[..], 11, None);
/// let mut out = Vec::new();
/// dec.read_to_end(&mut out)?;
///
/// assert_eq!(out, b"hello world");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct Decoder<R, B = ChunkBuffer> {
    reader: R,
    chunk: B,
    off: usize,
    len: usize,
    remaining: u64,
    fault: Option<Fault>,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder for `size` logical bytes, allocating a buffer if
    /// `scratch` is `None`.
    pub fn new(reader: R, size: u64, scratch: Option<ChunkBuffer>) -> Self {
        Self::with_buffer(reader, size, scratch.unwrap_or_default())
    }
}

impl<R: Read, B: BorrowMut<ChunkBuffer>> Decoder<R, B> {
    pub(crate) fn with_buffer(reader: R, size: u64, chunk: B) -> Self {
        Self {
            reader,
            chunk,
            off: 0,
            len: 0,
            remaining: size,
            fault: None,
        }
    }

    /// Returns the number of logical bytes not yet fetched from the source.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Returns the scratch buffer.
    pub fn into_buffer(self) -> B {
        self.chunk
    }

    /// Returns the source.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Fetches and verifies the next chunk, returning its visible payload.
    ///
    /// The payload sits at `[HEADER_LEN, HEADER_LEN + n)` of the buffer.
    pub(crate) fn fetch(&mut self) -> Result<usize, CodecError> {
        match self.try_fetch() {
            Ok(n) => Ok(n),
            Err(e) => {
                self.fault = Some(Fault::record(&e));
                Err(e)
            }
        }
    }

    fn try_fetch(&mut self) -> Result<usize, CodecError> {
        let chunk: &mut ChunkBuffer = self.chunk.borrow_mut();
        let min = self
            .remaining
            .saturating_add(HEADER_LEN as u64)
            .min(CHUNK_PHYS_LEN as u64) as usize;

        let n = read_at_least(&mut self.reader, chunk, min).map_err(CodecError::Source)?;
        verify(&chunk[..n])?;

        // Bytes past the declared length are checksummed but not exposed.
        let payload = ((n - HEADER_LEN) as u64).min(self.remaining) as usize;
        self.off = HEADER_LEN;
        self.len = HEADER_LEN + payload;
        self.remaining -= payload as u64;
        Ok(payload)
    }
}

impl<R: Read, B: BorrowMut<ChunkBuffer>> Read for Decoder<R, B> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.off == self.len {
            if let Some(fault) = self.fault {
                return Err(fault.to_io());
            }
            if self.remaining == 0 {
                return Ok(0);
            }
            self.fetch()?;
        }

        let chunk: &ChunkBuffer = self.chunk.borrow();
        let n = buf.len().min(self.len - self.off);
        buf[..n].copy_from_slice(&chunk[self.off..self.off + n]);
        self.off += n;
        Ok(n)
    }
}
