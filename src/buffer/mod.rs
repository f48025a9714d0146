//! Scratch buffers for encoding and decoding.
//!
//! Every codec operation works through one chunk-sized buffer. Callers that
//! run many operations can allocate a [`ChunkBuffer`] once and pass it in;
//! otherwise each call allocates its own. There is no shared pool.

mod scratch;

pub use scratch::ChunkBuffer;
