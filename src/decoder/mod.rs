//! Decoding: verifying chunks and yielding their payload.
//!
//! - [`Decoder`] - [`std::io::Read`] over an encoded stream of known length
//! - [`FramingDecoder`] - [`std::io::Read`] over an encoded stream of unknown
//!   length
//! - [`ChunkIter`] - Iterator over the verified chunks of an encoded stream
//! - [`decode_bytes`] - Decode an in-memory buffer
//! - [`range_decoder`] / [`decode_range`] - Decode a logical byte range from a
//!   random-access store
//! - [`SectionView`] - Skip-then-limit reader adapter

mod fault;
mod framing;
mod range;
mod section;
mod stream;

pub use framing::{ChunkIter, FramingDecoder, decode_bytes};
pub use range::{RangeDecoder, decode_range, range_decoder};
pub use section::SectionView;
pub use stream::Decoder;

pub(crate) use range::chunk_decoder;
