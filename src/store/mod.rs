//! An encoded stream bound to its store.
//!
//! - [`EncodedStore`] - Append, range reads and verification over one
//!   encoded stream

use std::io::{self, Read, Write};

use crate::access::{BoundedStore, ReadAt, WriteAt};
use crate::buffer::ChunkBuffer;
use crate::config::StoreConfig;
use crate::decoder::{RangeDecoder, decode_range, range_decoder};
use crate::encoder::append_encode;
use crate::error::CodecError;
use crate::geometry::{chunk_count, encode_size};

/// An encoded stream in a random-access store, tracking its logical size.
///
/// Appends take `&mut self`, which serializes them; reads take `&self`.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use crcchunk::{EncodedStore, MemStore};
///
/// let mut store = EncodedStore::new(MemStore::new());
/// store.append_bytes(b"hello ")?;
/// store.append_bytes(b"world")?;
///
/// let mut out = String::new();
/// store.reader(6, 11)?.read_to_string(&mut out)?;
/// assert_eq!(out, "world");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct EncodedStore<S> {
    store: S,
    config: StoreConfig,
    chunk: ChunkBuffer,
}

impl<S: ReadAt> EncodedStore<S> {
    /// Wraps an empty stream at the start of `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: StoreConfig::default(),
            chunk: ChunkBuffer::new(),
        }
    }

    /// Wraps an existing stream described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidConfig`] if `config` is invalid.
    pub fn open(store: S, config: StoreConfig) -> Result<Self, CodecError> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            chunk: ChunkBuffer::new(),
        })
    }

    /// Returns the logical size of the stream.
    pub fn logical_size(&self) -> u64 {
        self.config.logical_size()
    }

    /// Returns the encoded size of the stream.
    pub fn encoded_size(&self) -> u64 {
        encode_size(self.config.logical_size())
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns a reference to the underlying store.
    pub fn get_ref(&self) -> &S {
        &self.store
    }

    /// Consumes the wrapper and returns the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Opens a reader over logical bytes `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidRange`] if the range does not lie within
    /// the stream.
    pub fn reader(&self, from: u64, to: u64) -> Result<RangeDecoder<&S>, CodecError> {
        self.check_range(from, to)?;
        range_decoder(
            &self.store,
            self.config.base(),
            from,
            to,
            self.config.logical_size(),
            None,
        )
    }

    /// Decodes logical bytes `[from, to)` into `writer`.
    ///
    /// # Errors
    ///
    /// See [`decode_range`]; also [`CodecError::InvalidRange`] if the range
    /// does not lie within the stream.
    pub fn read_range<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        from: u64,
        to: u64,
    ) -> Result<(), CodecError> {
        self.check_range(from, to)?;
        decode_range(writer, &self.bounded(), self.config.base(), from, to, None)
    }

    /// Verifies every chunk of the stream, returning the number checked.
    pub fn verify(&self) -> Result<u64, CodecError> {
        let size = self.config.logical_size();
        decode_range(
            &mut io::sink(),
            &self.bounded(),
            self.config.base(),
            0,
            size,
            None,
        )?;
        Ok(chunk_count(size))
    }

    /// The store as seen up to the end of the encoded stream, so bytes past
    /// it (a torn append, unrelated trailing data) never join the last chunk.
    fn bounded(&self) -> BoundedStore<&S> {
        let end = self.config.encoded_end().unwrap_or(u64::MAX);
        BoundedStore::new(&self.store, end)
    }

    fn check_range(&self, from: u64, to: u64) -> Result<(), CodecError> {
        let size = self.config.logical_size();
        if from > to || to > size {
            return Err(CodecError::InvalidRange { from, to, size });
        }
        Ok(())
    }
}

impl<S: ReadAt + WriteAt> EncodedStore<S> {
    /// Appends `size` bytes from `reader` to the stream.
    ///
    /// The logical size only grows when the whole append succeeds.
    pub fn append<R: Read + ?Sized>(&mut self, reader: &mut R, size: u64) -> Result<(), CodecError> {
        let grown = self
            .config
            .logical_size()
            .checked_add(size)
            .map(|total| self.config.with_logical_size(total))
            .ok_or(CodecError::InvalidConfig {
                message: "logical size overflows u64",
            })?;
        grown.validate()?;

        append_encode(
            &mut self.store,
            self.config.base(),
            self.config.logical_size(),
            reader,
            size,
            Some(&mut self.chunk),
        )?;

        self.config = grown;
        tracing::debug!(size, logical_size = grown.logical_size(), "appended");
        Ok(())
    }

    /// Appends an in-memory buffer to the stream.
    pub fn append_bytes(&mut self, data: &[u8]) -> Result<(), CodecError> {
        self.append(&mut &data[..], data.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::MemStore;
    use crate::geometry::CHUNK_DATA_LEN;

    fn data(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 13 + 1) as u8).collect()
    }

    #[test]
    fn test_append_grows_logical_size() {
        let mut store = EncodedStore::new(MemStore::new());
        store.append_bytes(&data(10)).unwrap();
        store.append_bytes(&data(CHUNK_DATA_LEN)).unwrap();

        assert_eq!(store.logical_size(), CHUNK_DATA_LEN as u64 + 10);
        assert_eq!(store.encoded_size(), CHUNK_DATA_LEN as u64 + 10 + 8);
        assert_eq!(store.get_ref().len() as u64, store.encoded_size());
        assert_eq!(store.verify().unwrap(), 2);
    }

    #[test]
    fn test_failed_append_keeps_size() {
        let mut store = EncodedStore::new(MemStore::new());
        store.append_bytes(b"abc").unwrap();

        let err = store.append(&mut &b"xy"[..], 5).unwrap_err();
        assert!(err.is_source());
        assert_eq!(store.logical_size(), 3);

        let mut out = Vec::new();
        store.read_range(&mut out, 0, 3).unwrap();
        assert_eq!(out, b"abc");
    }

    #[test]
    fn test_torn_append_leaves_old_size_readable() {
        let mut store = EncodedStore::new(MemStore::new());
        store.append_bytes(b"abc").unwrap();

        // The source fills the partial chunk, then runs dry before the next.
        let fill = vec![0x55u8; CHUNK_DATA_LEN - 3];
        let err = store
            .append(&mut &fill[..], CHUNK_DATA_LEN as u64 + 10)
            .unwrap_err();
        assert!(err.is_source());
        assert_eq!(store.logical_size(), 3);
        assert!(store.get_ref().len() > 7);

        let mut out = Vec::new();
        store.reader(0, 3).unwrap().read_to_end(&mut out).unwrap();
        assert_eq!(out, b"abc");

        let mut out = Vec::new();
        store.read_range(&mut out, 0, 3).unwrap();
        assert_eq!(out, b"abc");
        assert_eq!(store.verify().unwrap(), 1);
    }

    #[test]
    fn test_trailing_bytes_after_stream_are_ignored() {
        let mut raw = crate::encoder::encode_bytes(b"hello").to_vec();
        raw.extend_from_slice(b"OTHER-DATA");
        let config = StoreConfig::new(0, 5).unwrap();
        let store = EncodedStore::open(MemStore::from(raw), config).unwrap();

        let mut out = Vec::new();
        store.read_range(&mut out, 0, 5).unwrap();
        assert_eq!(out, b"hello");

        let mut out = Vec::new();
        store.read_range(&mut out, 1, 4).unwrap();
        assert_eq!(out, b"ell");
        assert_eq!(store.verify().unwrap(), 1);
    }

    #[test]
    fn test_open_existing_with_base() {
        let input = data(300);
        let mut raw = b"HDR".to_vec();
        raw.extend_from_slice(&crate::encoder::encode_bytes(&input));

        let config = StoreConfig::new(3, 300).unwrap();
        let store = EncodedStore::open(MemStore::from(raw), config).unwrap();

        let mut out = Vec::new();
        store.reader(100, 150).unwrap().read_to_end(&mut out).unwrap();
        assert_eq!(out, &input[100..150]);
    }

    #[test]
    fn test_range_checks() {
        let mut store = EncodedStore::new(MemStore::new());
        store.append_bytes(b"hello").unwrap();

        assert!(matches!(
            store.reader(0, 6),
            Err(CodecError::InvalidRange { .. })
        ));
        assert!(matches!(
            store.read_range(&mut Vec::new(), 4, 2),
            Err(CodecError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_verify_detects_corruption() {
        let mut store = EncodedStore::new(MemStore::new());
        store.append_bytes(&data(1000)).unwrap();

        let mut inner = store.into_inner();
        inner.as_mut_slice()[500] ^= 0xFF;
        let store = EncodedStore::open(inner, StoreConfig::new(0, 1000).unwrap()).unwrap();
        assert!(store.verify().unwrap_err().is_integrity());
    }
}
