//! Skip-then-limit reader adapter.

use std::io::{self, Read};

/// A reader that discards the first `skip` bytes of another reader and then
/// yields at most `limit` bytes.
///
/// The skip is deferred to the first read, so constructing a view costs
/// nothing. If the inner reader ends during the skip, the view is empty.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use crcchunk::SectionView;
///
/// let mut view = SectionView::new(&b"0123456789"[..], 2, 5);
/// let mut out = String::new();
/// view.read_to_string(&mut out)?;
///
/// assert_eq!(out, "23456");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct SectionView<R> {
    inner: R,
    skip: u64,
    remaining: u64,
}

impl<R: Read> SectionView<R> {
    /// Creates a view skipping `skip` bytes and then limited to `limit`.
    pub fn new(inner: R, skip: u64, limit: u64) -> Self {
        Self {
            inner,
            skip,
            remaining: limit,
        }
    }

    /// Returns the number of bytes the view may still yield.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Returns the inner reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn discard(&mut self) -> io::Result<()> {
        let skipped = io::copy(&mut (&mut self.inner).take(self.skip), &mut io::sink())?;
        if skipped < self.skip {
            self.remaining = 0;
        }
        self.skip = 0;
        Ok(())
    }
}

impl<R: Read> Read for SectionView<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.skip > 0 {
            self.discard()?;
        }
        if self.remaining == 0 {
            return Ok(0);
        }

        let max = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        let len = buf.len().min(max);
        let n = self.inner.read(&mut buf[..len])?;
        self.remaining -= n as u64;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts reads so the deferred skip can be observed.
    struct Counting<'a> {
        data: &'a [u8],
        reads: usize,
    }

    impl Read for Counting<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            self.data.read(buf)
        }
    }

    #[test]
    fn test_skip_is_deferred() {
        let mut view = SectionView::new(
            Counting {
                data: b"abcdef",
                reads: 0,
            },
            3,
            2,
        );
        assert_eq!(view.inner.reads, 0);

        let mut out = Vec::new();
        view.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"de");
        assert!(view.into_inner().reads > 0);
    }

    #[test]
    fn test_limit_past_end() {
        let mut view = SectionView::new(&b"abc"[..], 1, 10);
        let mut out = Vec::new();
        view.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"bc");
    }

    #[test]
    fn test_skip_past_end_is_empty() {
        let mut view = SectionView::new(&b"abc"[..], 5, 10);
        let mut out = Vec::new();
        view.read_to_end(&mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(view.remaining(), 0);
    }
}
