//! Buffered encoding writer.

use std::io::{self, Write};

use crate::buffer::ChunkBuffer;
use crate::geometry::{CHUNK_DATA_LEN, HEADER_LEN};
use crate::hash::Crc32Hasher;

/// A writer that encodes everything written to it.
///
/// Writes of any size are gathered into chunk payloads; each time a payload
/// reaches [`CHUNK_DATA_LEN`] bytes the full chunk is written to the inner
/// writer. Call [`FrameWriter::finish`] once at the end to write the final
/// partial chunk. Dropping the writer without finishing loses it.
///
/// [`Write::flush`] flushes the inner writer only; it never cuts a chunk
/// short, since a short chunk is only valid at the end of a stream.
///
/// If the inner writer fails partway through a chunk, the bytes it already
/// accepted are remembered and the next call resumes after them.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use crcchunk::{FrameWriter, encode_bytes};
///
/// let mut w = FrameWriter::new(Vec::new());
/// w.write_all(b"hello ")?;
/// w.write_all(b"world")?;
/// let encoded = w.finish()?;
///
/// assert_eq!(encoded, encode_bytes(b"hello world"));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct FrameWriter<W: Write> {
    inner: W,
    chunk: ChunkBuffer,
    hasher: Crc32Hasher,
    /// Bytes of the pending physical chunk already accepted by `inner`.
    emitted: usize,
}

impl<W: Write> FrameWriter<W> {
    /// Creates a writer that encodes into `inner`.
    pub fn new(inner: W) -> Self {
        Self::with_buffer(inner, ChunkBuffer::new())
    }

    /// Creates a writer using an existing scratch buffer.
    pub fn with_buffer(inner: W, chunk: ChunkBuffer) -> Self {
        Self {
            inner,
            chunk,
            hasher: Crc32Hasher::new(),
            emitted: 0,
        }
    }

    /// Returns the number of payload bytes waiting for the next chunk.
    pub fn buffered(&self) -> usize {
        self.hasher.len()
    }

    /// Returns a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Writes the buffered payload as one chunk, resuming after any bytes
    /// an earlier failed attempt got through.
    fn emit(&mut self) -> io::Result<()> {
        let len = HEADER_LEN + self.hasher.len();
        if self.emitted == 0 {
            self.hasher.finalize().write_header(&mut self.chunk);
        }
        while self.emitted < len {
            match self.inner.write(&self.chunk[self.emitted..len]) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => self.emitted += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        self.emitted = 0;
        self.hasher.reset();
        Ok(())
    }

    /// Writes the final partial chunk, flushes, and returns the inner writer.
    ///
    /// Nothing is written when no payload is buffered.
    pub fn finish(mut self) -> io::Result<W> {
        if self.hasher.len() > 0 {
            self.emit()?;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> Write for FrameWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // A full chunk left over from a failed emit goes out first.
        if self.hasher.len() == CHUNK_DATA_LEN {
            self.emit()?;
        }

        let mut written = 0;
        while written < buf.len() {
            let filled = self.hasher.len();
            let n = (CHUNK_DATA_LEN - filled).min(buf.len() - written);
            let part = &buf[written..written + n];

            let start = HEADER_LEN + filled;
            self.chunk[start..start + n].copy_from_slice(part);
            self.hasher.update(part);
            written += n;

            if self.hasher.len() == CHUNK_DATA_LEN {
                if let Err(e) = self.emit() {
                    // The bytes are buffered; report them and resume next call.
                    tracing::debug!(error = %e, emitted = self.emitted, "deferring full chunk");
                    return Ok(written);
                }
            }
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
