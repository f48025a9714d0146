//! Self-framing encoder for sources of unknown length.

use std::io::{self, Read};

use crate::buffer::ChunkBuffer;
use crate::chunk::seal;
use crate::geometry::{CHUNK_DATA_LEN, HEADER_LEN};
use crate::util::read_full;

/// A reader that yields the encoded form of another reader.
///
/// Each chunk is framed from as many bytes as the source delivers, up to
/// [`CHUNK_DATA_LEN`]; the chunk framed when the source runs dry is the
/// shorter terminal chunk. No length is needed up front.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use crcchunk::{FramingEncoder, encode_bytes};
///
/// let mut enc = FramingEncoder::new(&b"hello world"[..], None);
/// let mut encoded = Vec::new();
/// enc.read_to_end(&mut encoded)?;
///
/// assert_eq!(encoded, encode_bytes(b"hello world"));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct FramingEncoder<R> {
    reader: R,
    chunk: ChunkBuffer,
    off: usize,
    len: usize,
    finished: bool,
}

impl<R: Read> FramingEncoder<R> {
    /// Creates an encoder over `reader`, allocating a buffer if `scratch` is
    /// `None`.
    pub fn new(reader: R, scratch: Option<ChunkBuffer>) -> Self {
        Self {
            reader,
            chunk: scratch.unwrap_or_default(),
            off: 0,
            len: 0,
            finished: false,
        }
    }

    /// Frames the next chunk from the source.
    fn fetch(&mut self) -> io::Result<()> {
        let n = read_full(&mut self.reader, &mut self.chunk[HEADER_LEN..])?;
        if n < CHUNK_DATA_LEN {
            self.finished = true;
        }
        self.off = 0;
        self.len = 0;
        if n > 0 {
            self.len = HEADER_LEN + n;
            seal(&mut self.chunk[..self.len]);
        }
        Ok(())
    }

    /// Returns the source and the scratch buffer.
    pub fn into_parts(self) -> (R, ChunkBuffer) {
        (self.reader, self.chunk)
    }
}

impl<R: Read> Read for FramingEncoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.off == self.len {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode_bytes;

    fn encode_all(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        FramingEncoder::new(data, None)
            .read_to_end(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        assert!(encode_all(b"").is_empty());
    }

    #[test]
    fn test_matches_sized_encoding() {
        for len in [1, CHUNK_DATA_LEN - 1, CHUNK_DATA_LEN, CHUNK_DATA_LEN + 1] {
            let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            assert_eq!(encode_all(&data), encode_bytes(&data), "len {}", len);
        }
    }

    #[test]
    fn test_small_reads() {
        let data: Vec<u8> = (0..1000).map(|i| i as u8).collect();
        let mut enc = FramingEncoder::new(&data[..], None);
        let mut out = Vec::new();
        let mut buf = [0u8; 7];
        loop {
            let n = enc.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(out, encode_bytes(&data));
    }
}
