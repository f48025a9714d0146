//! Positional I/O traits and the in-memory store.

use std::io;

use bytes::Bytes;

/// Reading at an absolute offset.
///
/// Like [`std::io::Read`], a call may return fewer bytes than requested;
/// `Ok(0)` means `offset` is at or past the end of the data.
pub trait ReadAt {
    /// Reads bytes starting at `offset` into `buf`.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;
}

/// Writing at an absolute offset.
///
/// Writing past the current end extends the store.
pub trait WriteAt {
    /// Writes bytes from `buf` starting at `offset`.
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize>;

    /// Writes all of `buf` starting at `offset`.
    fn write_all_at(&mut self, mut buf: &[u8], mut offset: u64) -> io::Result<()> {
        while !buf.is_empty() {
            match self.write_at(buf, offset) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => {
                    buf = &buf[n..];
                    offset += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &T {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &mut T {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }
}

impl<T: WriteAt + ?Sized> WriteAt for &mut T {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        (**self).write_at(buf, offset)
    }
}

impl<T: ReadAt + ?Sized> ReadAt for Box<T> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }
}

impl<T: WriteAt + ?Sized> WriteAt for Box<T> {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        (**self).write_at(buf, offset)
    }
}

impl ReadAt for [u8] {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        let Ok(start) = usize::try_from(offset) else {
            return Ok(0);
        };
        if start >= self.len() {
            return Ok(0);
        }
        let n = buf.len().min(self.len() - start);
        buf[..n].copy_from_slice(&self[start..start + n]);
        Ok(n)
    }
}

#[cfg(all(feature = "std-fs", unix))]
impl ReadAt for std::fs::File {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }
}

#[cfg(all(feature = "std-fs", unix))]
impl WriteAt for std::fs::File {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::write_at(self, buf, offset)
    }
}

#[cfg(all(feature = "std-fs", windows))]
impl ReadAt for std::fs::File {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }
}

#[cfg(all(feature = "std-fs", windows))]
impl WriteAt for std::fs::File {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_write(self, buf, offset)
    }
}

/// A growable in-memory store.
///
/// Writes past the end zero-fill any gap before the written bytes.
///
/// # Example
///
/// ```
/// use crcchunk::{MemStore, ReadAt, WriteAt};
///
/// let mut store = MemStore::new();
/// store.write_all_at(b"abc", 2)?;
/// assert_eq!(store.as_slice(), b"\0\0abc");
///
/// let mut buf = [0u8; 2];
/// assert_eq!(store.read_at(&mut buf, 3)?, 2);
/// assert_eq!(&buf, b"bc");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemStore {
    data: Vec<u8>,
}

impl MemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the store holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the stored bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns the stored bytes mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Shrinks or zero-extends the store to `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.data.resize(len, 0);
    }

    /// Consumes the store and returns its bytes.
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.data)
    }
}

impl From<Vec<u8>> for MemStore {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl ReadAt for MemStore {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        self.data.as_slice().read_at(buf, offset)
    }
}

impl WriteAt for MemStore {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        let start = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset out of range"))?;
        let end = start + buf.len();
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(buf);
        Ok(buf.len())
    }
}
