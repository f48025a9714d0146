//! Random-access decoding of a logical byte range.

use std::borrow::BorrowMut;
use std::io::{self, Read, Write};

use super::SectionView;
use super::stream::Decoder;
use crate::access::{ReadAt, StoreSection};
use crate::buffer::ChunkBuffer;
use crate::chunk::verify;
use crate::error::CodecError;
use crate::geometry::{
    CHUNK_DATA_LEN, HEADER_LEN, chunk_index, chunk_start, decode_size, encode_size,
    offset_in_chunk,
};
use crate::util::read_full_at;

/// A reader over a logical range of an encoded store.
///
/// Created by [`range_decoder`]. Ranges that start on a chunk boundary and
/// run to the end of the data decode directly; other ranges go through a
/// [`SectionView`] that trims the partial chunks at either end.
#[derive(Debug)]
pub enum RangeDecoder<S> {
    /// Aligned start, running to the end of the data.
    Whole(Decoder<StoreSection<S>>),
    /// Any other range.
    Section(SectionView<Decoder<StoreSection<S>>>),
}

impl<S: ReadAt> RangeDecoder<S> {
    /// Returns the scratch buffer.
    pub fn into_buffer(self) -> ChunkBuffer {
        match self {
            RangeDecoder::Whole(dec) => dec.into_buffer(),
            RangeDecoder::Section(view) => view.into_inner().into_buffer(),
        }
    }
}

impl<S: ReadAt> Read for RangeDecoder<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            RangeDecoder::Whole(dec) => dec.read(buf),
            RangeDecoder::Section(view) => view.read(buf),
        }
    }
}

/// Builds a decoder starting at the chunk holding logical byte `from` and
/// running to the end of `size` logical bytes.
pub(crate) fn chunk_decoder<S, B>(
    store: S,
    base: u64,
    from: u64,
    size: u64,
    chunk: B,
) -> Decoder<StoreSection<S>, B>
where
    S: ReadAt,
    B: BorrowMut<ChunkBuffer>,
{
    let from_base = chunk_start(chunk_index(from));
    let extent = encode_size(size) - from_base;
    let section = StoreSection::new(store, base + from_base, extent);
    Decoder::with_buffer(section, decode_size(extent), chunk)
}

/// Opens a reader over logical bytes `[from, to)` of an encoded store.
///
/// Only the chunks covering the range are read, each verified before its
/// bytes are returned. `to` past the end of the data is clamped.
///
/// # Arguments
///
/// * `store` - Store holding the encoded stream
/// * `base` - Offset of the encoded stream within the store
/// * `from`, `to` - Logical range to decode
/// * `size` - Logical size of the encoded stream
/// * `scratch` - Buffer to use, or `None` to allocate one
///
/// # Errors
///
/// Returns [`CodecError::InvalidRange`] if `from > to` or `from > size`.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use crcchunk::{MemStore, encode_bytes, range_decoder};
///
/// let store = MemStore::from(encode_bytes(b"hello world").to_vec());
/// let mut out = String::new();
/// range_decoder(&store, 0, 6, 11, 11, None)?.read_to_string(&mut out)?;
///
/// assert_eq!(out, "world");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn range_decoder<S: ReadAt>(
    store: S,
    base: u64,
    from: u64,
    to: u64,
    size: u64,
    scratch: Option<ChunkBuffer>,
) -> Result<RangeDecoder<S>, CodecError> {
    if from > to || from > size {
        return Err(CodecError::InvalidRange { from, to, size });
    }

    let dec = chunk_decoder(store, base, from, size, scratch.unwrap_or_default());
    let skip = offset_in_chunk(from) as u64;
    if skip == 0 && to >= size {
        return Ok(RangeDecoder::Whole(dec));
    }

    tracing::debug!(from, to, skip, "opening range section");
    Ok(RangeDecoder::Section(SectionView::new(dec, skip, to - from)))
}

/// Decodes logical bytes `[from, to)` of an encoded store into `writer`.
///
/// Reads each covering chunk whole, verifies it, and writes only the
/// overlapping part of its payload. The encoded stream must end where the
/// store ends, since a final partial chunk is read up to the store's end.
///
/// On error, bytes already written to `writer` stay written; treat the
/// output of a failed call as unusable.
///
/// # Errors
///
/// - [`CodecError::Source`] if the store fails or holds less data than the
///   range needs, including a `to` past the end of the data
/// - [`CodecError::Sink`] if `writer` fails
/// - an integrity fault if a chunk fails verification
pub fn decode_range<W, S>(
    writer: &mut W,
    store: &S,
    base: u64,
    from: u64,
    to: u64,
    scratch: Option<&mut ChunkBuffer>,
) -> Result<(), CodecError>
where
    W: Write + ?Sized,
    S: ReadAt + ?Sized,
{
    if from >= to {
        return Ok(());
    }

    ChunkBuffer::scoped(scratch, |chunk| {
        let (mut idx, to_idx) = (chunk_index(from), chunk_index(to));
        let (mut start, end) = (offset_in_chunk(from), offset_in_chunk(to));
        if idx == to_idx {
            return decode_at(writer, store, base, chunk, idx, start, end);
        }

        while idx < to_idx {
            decode_at(writer, store, base, chunk, idx, start, CHUNK_DATA_LEN)?;
            idx += 1;
            start = 0;
        }
        if end > 0 {
            decode_at(writer, store, base, chunk, idx, 0, end)?;
        }
        Ok(())
    })
}

/// Verifies chunk `idx` and writes payload bytes `[from, to)` of it.
fn decode_at<W, S>(
    writer: &mut W,
    store: &S,
    base: u64,
    chunk: &mut ChunkBuffer,
    idx: u64,
    from: usize,
    to: usize,
) -> Result<(), CodecError>
where
    W: Write + ?Sized,
    S: ReadAt + ?Sized,
{
    let n = read_full_at(store, chunk, base + chunk_start(idx)).map_err(CodecError::Source)?;
    if n == 0 {
        return Err(CodecError::Source(io::ErrorKind::UnexpectedEof.into()));
    }
    verify(&chunk[..n])?;

    // The chunk must hold the whole requested slice, not just part of it.
    let (start, end) = (HEADER_LEN + from, HEADER_LEN + to);
    if end > n {
        return Err(CodecError::Source(io::ErrorKind::UnexpectedEof.into()));
    }
    writer.write_all(&chunk[start..end]).map_err(CodecError::Sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::MemStore;
    use crate::encoder::encode_bytes;

    fn data(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 17 + 5) as u8).collect()
    }

    fn read_range(store: &MemStore, from: u64, to: u64, size: u64) -> Vec<u8> {
        let mut out = Vec::new();
        range_decoder(store, 0, from, to, size, None)
            .unwrap()
            .read_to_end(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_aligned_to_end_is_whole() {
        let input = data(100);
        let store = MemStore::from(encode_bytes(&input).to_vec());
        let dec = range_decoder(&store, 0, 0, 100, 100, None).unwrap();
        assert!(matches!(dec, RangeDecoder::Whole(_)));
    }

    #[test]
    fn test_unaligned_ranges_match_slices() {
        let input = data(2 * CHUNK_DATA_LEN + 100);
        let size = input.len() as u64;
        let store = MemStore::from(encode_bytes(&input).to_vec());

        for (from, to) in [
            (3u64, 10u64),
            (10, CHUNK_DATA_LEN as u64 + 20),
            (CHUNK_DATA_LEN as u64, size),
            (CHUNK_DATA_LEN as u64 - 1, size),
            (size, size),
        ] {
            assert_eq!(
                read_range(&store, from, to, size),
                &input[from as usize..to as usize],
                "range {}..{}",
                from,
                to
            );
        }
    }

    #[test]
    fn test_with_base_offset() {
        let input = data(500);
        let mut raw = vec![0xEE; 7];
        raw.extend_from_slice(&encode_bytes(&input));
        let store = MemStore::from(raw);

        let mut out = Vec::new();
        range_decoder(&store, 7, 100, 200, 500, None)
            .unwrap()
            .read_to_end(&mut out)
            .unwrap();
        assert_eq!(out, &input[100..200]);

        let mut out = Vec::new();
        decode_range(&mut out, &store, 7, 100, 200, None).unwrap();
        assert_eq!(out, &input[100..200]);
    }

    #[test]
    fn test_invalid_range() {
        let store = MemStore::new();
        assert!(matches!(
            range_decoder(&store, 0, 5, 3, 10, None),
            Err(CodecError::InvalidRange { .. })
        ));
        assert!(matches!(
            range_decoder(&store, 0, 11, 12, 10, None),
            Err(CodecError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_decode_range_chunk_aligned_end() {
        let input = data(2 * CHUNK_DATA_LEN);
        let store = MemStore::from(encode_bytes(&input).to_vec());
        let mut out = Vec::new();
        decode_range(&mut out, &store, 0, 5, CHUNK_DATA_LEN as u64, None).unwrap();
        assert_eq!(out, &input[5..CHUNK_DATA_LEN]);
    }

    #[test]
    fn test_decode_range_past_end() {
        let input = data(100);
        let store = MemStore::from(encode_bytes(&input).to_vec());
        let mut out = Vec::new();
        let err = decode_range(&mut out, &store, 0, 100, 120, None).unwrap_err();
        assert!(err.is_source());
    }

    #[test]
    fn test_decode_range_end_inside_last_chunk_past_data() {
        let input = data(100);
        let store = MemStore::from(encode_bytes(&input).to_vec());
        let mut out = Vec::new();
        let err = decode_range(&mut out, &store, 0, 0, 120, None).unwrap_err();
        assert!(matches!(&err, CodecError::Source(e) if e.kind() == io::ErrorKind::UnexpectedEof));

        let mut out = Vec::new();
        decode_range(&mut out, &store, 0, 0, 100, None).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_decode_range_empty_is_noop() {
        let store = MemStore::new();
        let mut out = Vec::new();
        decode_range(&mut out, &store, 0, 10, 10, None).unwrap();
        assert!(out.is_empty());
    }
}
