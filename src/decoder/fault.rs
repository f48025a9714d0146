//! Sticky decoder faults.

use std::io;

use crate::error::CodecError;

/// A failure remembered by a decoder so every later read reports it again.
#[derive(Debug, Clone, Copy)]
pub(super) enum Fault {
    Io(io::ErrorKind),
    Mismatch { expected: u32, actual: u32 },
    Malformed { len: usize },
}

impl Fault {
    /// Remembers `err`, which is about to be returned to the caller.
    pub(super) fn record(err: &CodecError) -> Self {
        match err {
            CodecError::ChecksumMismatch { expected, actual } => Fault::Mismatch {
                expected: *expected,
                actual: *actual,
            },
            CodecError::MalformedChunk { len } => Fault::Malformed { len: *len },
            CodecError::Source(e) | CodecError::Sink(e) => Fault::Io(e.kind()),
            CodecError::InvalidRange { .. } | CodecError::InvalidConfig { .. } => {
                Fault::Io(io::ErrorKind::InvalidInput)
            }
        }
    }

    pub(super) fn to_io(self) -> io::Error {
        match self {
            Fault::Io(kind) => kind.into(),
            Fault::Mismatch { expected, actual } => {
                CodecError::ChecksumMismatch { expected, actual }.into()
            }
            Fault::Malformed { len } => CodecError::MalformedChunk { len }.into(),
        }
    }
}
