//! Encoding: turning logical bytes into checksummed chunks.
//!
//! - [`encode`] - Encode a source of known length into a sink
//! - [`encode_bytes`] - Encode an in-memory buffer
//! - [`FramingEncoder`] - [`std::io::Read`] adapter yielding encoded bytes
//!   from a source of unknown length
//! - [`FrameWriter`] - [`std::io::Write`] adapter accepting writes of any size
//! - [`append_encode`] - Extend an encoded stream held in a random-access store

mod append;
mod framing;
mod stream;
mod writer;

pub use append::append_encode;
pub use framing::FramingEncoder;
pub use stream::{encode, encode_bytes};
pub use writer::FrameWriter;

pub(crate) use stream::encode_with;
