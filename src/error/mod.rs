//! Error types for crcchunk.

use std::fmt;
use std::io;

/// Errors that can occur during encode, decode and append operations.
///
/// Three fault categories are kept apart: the byte source failed
/// ([`CodecError::Source`]), the destination or store failed
/// ([`CodecError::Sink`]), or the encoded data is damaged
/// ([`CodecError::ChecksumMismatch`], [`CodecError::MalformedChunk`]).
#[derive(Debug)]
pub enum CodecError {
    /// The byte source could not satisfy a read.
    Source(io::Error),

    /// The sink or store could not accept a write, or could not supply
    /// previously written bytes on readback.
    Sink(io::Error),

    /// A chunk's stored checksum does not match its payload.
    ChecksumMismatch {
        /// Checksum stored in the chunk header.
        expected: u32,
        /// Checksum computed over the payload.
        actual: u32,
    },

    /// A chunk too short to hold a header and at least one payload byte.
    MalformedChunk {
        /// Physical length of the chunk that was read.
        len: usize,
    },

    /// The requested logical range does not fit the encoded data.
    InvalidRange {
        /// Start of the requested range.
        from: u64,
        /// End of the requested range (exclusive).
        to: u64,
        /// Logical size of the encoded data.
        size: u64,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl CodecError {
    /// Returns true for checksum and framing faults.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            CodecError::ChecksumMismatch { .. } | CodecError::MalformedChunk { .. }
        )
    }

    /// Returns true if the byte source failed.
    pub fn is_source(&self) -> bool {
        matches!(self, CodecError::Source(_))
    }

    /// Returns true if the sink or store failed.
    pub fn is_sink(&self) -> bool {
        matches!(self, CodecError::Sink(_))
    }

    /// Recovers a codec error that travelled through an [`io::Error`].
    ///
    /// Decoders implement [`io::Read`], so their integrity faults surface as
    /// `io::Error` values of kind [`io::ErrorKind::InvalidData`] wrapping a
    /// `CodecError`. This unwraps such a value; any other I/O error is
    /// attributed to the byte source.
    pub fn from_io(err: io::Error) -> Self {
        match err.downcast::<CodecError>() {
            Ok(codec) => codec,
            Err(err) => CodecError::Source(err),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Source(e) => write!(f, "source error: {}", e),
            CodecError::Sink(e) => write!(f, "sink error: {}", e),
            CodecError::ChecksumMismatch { expected, actual } => {
                write!(
                    f,
                    "unmatched checksum: expected {:#010x}, got {:#010x}",
                    expected, actual
                )
            }
            CodecError::MalformedChunk { len } => {
                write!(f, "malformed chunk: {} bytes", len)
            }
            CodecError::InvalidRange { from, to, size } => {
                write!(f, "invalid range {}..{} (size {})", from, to, size)
            }
            CodecError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Source(e) | CodecError::Sink(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecError> for io::Error {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Source(e) | CodecError::Sink(e) => e,
            CodecError::InvalidRange { .. } | CodecError::InvalidConfig { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, e)
            }
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
