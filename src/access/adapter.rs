//! Sequential views over random-access stores.

use std::io::{self, Read, Write};

use super::{ReadAt, WriteAt};

/// Reads `[offset, offset + limit)` of a store sequentially.
///
/// Reading stops at the limit or at the store's end, whichever is first.
#[derive(Debug)]
pub struct StoreSection<S> {
    store: S,
    pos: u64,
    end: u64,
}

impl<S: ReadAt> StoreSection<S> {
    /// Creates a section of `limit` bytes starting at `offset`.
    pub fn new(store: S, offset: u64, limit: u64) -> Self {
        Self {
            store,
            pos: offset,
            end: offset.saturating_add(limit),
        }
    }

    /// Returns the number of bytes left before the limit.
    pub fn remaining(&self) -> u64 {
        self.end - self.pos
    }

    /// Returns the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: ReadAt> Read for StoreSection<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let max = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        let len = buf.len().min(max);
        if len == 0 {
            return Ok(0);
        }
        let n = self.store.read_at(&mut buf[..len], self.pos)?;
        self.pos += n as u64;
        Ok(n)
    }
}

/// A store cut off at `end`: reads at or past it see end of data.
#[derive(Debug)]
pub(crate) struct BoundedStore<S> {
    store: S,
    end: u64,
}

impl<S: ReadAt> BoundedStore<S> {
    pub(crate) fn new(store: S, end: u64) -> Self {
        Self { store, end }
    }
}

impl<S: ReadAt> ReadAt for BoundedStore<S> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        if offset >= self.end {
            return Ok(0);
        }
        let max = usize::try_from(self.end - offset).unwrap_or(usize::MAX);
        let len = buf.len().min(max);
        self.store.read_at(&mut buf[..len], offset)
    }
}

/// Writes sequentially into a store, starting at an offset.
#[derive(Debug)]
pub struct OffsetWriter<S> {
    store: S,
    offset: u64,
}

impl<S: WriteAt> OffsetWriter<S> {
    /// Creates a writer positioned at `offset`.
    pub fn new(store: S, offset: u64) -> Self {
        Self { store, offset }
    }

    /// Returns the offset of the next write.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: WriteAt> Write for OffsetWriter<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.store.write_at(buf, self.offset)?;
        self.offset += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
