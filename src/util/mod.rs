//! Internal read helpers.
//!
//! [`std::io::Read::read_exact`] cannot report how much it read before the
//! source ran dry, and chunk framing needs that count to size the final
//! chunk. It is an implementation detail and not part of the public API.

use std::io::{self, Read};

use crate::access::ReadAt;

/// Reads until `buf` is full or the source is exhausted.
///
/// Returns the number of bytes read; less than `buf.len()` only at end of
/// data.
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut n = 0;
    while n < buf.len() {
        match reader.read(&mut buf[n..]) {
            Ok(0) => break,
            Ok(m) => n += m,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(n)
}

/// Reads at least `min` bytes into `buf`, stopping as soon as `min` is
/// reached.
///
/// Fails with [`io::ErrorKind::UnexpectedEof`] if the source ends first.
pub(crate) fn read_at_least<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    min: usize,
) -> io::Result<usize> {
    debug_assert!(min <= buf.len());
    let mut n = 0;
    while n < min {
        match reader.read(&mut buf[n..]) {
            Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
            Ok(m) => n += m,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(n)
}

/// Positional counterpart of [`read_full`].
pub(crate) fn read_full_at<S: ReadAt + ?Sized>(
    store: &S,
    buf: &mut [u8],
    offset: u64,
) -> io::Result<usize> {
    let mut n = 0;
    while n < buf.len() {
        match store.read_at(&mut buf[n..], offset + n as u64) {
            Ok(0) => break,
            Ok(m) => n += m,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yields at most `step` bytes per read.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_read_full_across_short_reads() {
        let mut src = Trickle {
            data: b"abcdefgh",
            step: 3,
        };
        let mut buf = [0u8; 6];
        assert_eq!(read_full(&mut src, &mut buf).unwrap(), 6);
        assert_eq!(&buf, b"abcdef");

        let mut buf = [0u8; 6];
        assert_eq!(read_full(&mut src, &mut buf).unwrap(), 2);
        assert_eq!(read_full(&mut src, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_read_at_least() {
        let mut src = Trickle {
            data: b"abcdefgh",
            step: 3,
        };
        let mut buf = [0u8; 8];
        // stops once the minimum is covered
        assert_eq!(read_at_least(&mut src, &mut buf, 4).unwrap(), 6);

        let err = read_at_least(&mut src, &mut buf, 4).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_read_full_at() {
        let data = b"0123456789".as_slice();
        let mut buf = [0u8; 4];
        assert_eq!(read_full_at(data, &mut buf, 8).unwrap(), 2);
        assert_eq!(&buf[..2], b"89");
        assert_eq!(read_full_at(data, &mut buf, 20).unwrap(), 0);
    }
}
