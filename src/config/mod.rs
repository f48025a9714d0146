//! Configuration for an encoded store.
//!
//! - [`StoreConfig`] - Where an encoded stream sits in its store and how
//!   much logical data it already holds

use crate::error::CodecError;
use crate::geometry::{HEADER_LEN, chunk_count};

/// Location and size of an encoded stream within a store.
///
/// The chunk geometry itself is fixed by the format and is not configurable.
///
/// # Example
///
/// ```
/// use crcchunk::StoreConfig;
///
/// // Empty stream at the start of the store
/// let config = StoreConfig::default();
///
/// // Existing stream of 1000 logical bytes behind a 512-byte header
/// let config = StoreConfig::new(512, 1000)?;
///
/// // Builder pattern
/// let config = StoreConfig::default()
///     .with_base(512)
///     .with_logical_size(1000);
/// # Ok::<(), crcchunk::CodecError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StoreConfig {
    /// Offset of the first chunk within the store.
    base: u64,

    /// Logical bytes already encoded in the store.
    logical_size: u64,
}

impl StoreConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidConfig`] if the end of the encoded stream
    /// would not fit in a `u64` offset.
    pub fn new(base: u64, logical_size: u64) -> Result<Self, CodecError> {
        let config = Self { base, logical_size };
        config.validate()?;
        Ok(config)
    }

    /// Sets the base offset.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`StoreConfig::validate`] to check it.
    pub fn with_base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    /// Sets the logical size already encoded.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_logical_size(mut self, logical_size: u64) -> Self {
        self.logical_size = logical_size;
        self
    }

    /// Returns the base offset.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Returns the logical size.
    pub fn logical_size(&self) -> u64 {
        self.logical_size
    }

    /// Returns the store offset just past the last chunk, if it fits.
    pub fn encoded_end(&self) -> Option<u64> {
        let headers = chunk_count(self.logical_size).checked_mul(HEADER_LEN as u64)?;
        self.logical_size
            .checked_add(headers)?
            .checked_add(self.base)
    }

    /// Validates the current configuration.
    ///
    /// ```
    /// use crcchunk::StoreConfig;
    ///
    /// let config = StoreConfig::default().with_base(u64::MAX).with_logical_size(1);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CodecError> {
        match self.encoded_end() {
            Some(_) => Ok(()),
            None => Err(CodecError::InvalidConfig {
                message: "encoded stream end overflows u64",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::encode_size;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.base(), 0);
        assert_eq!(config.logical_size(), 0);
        assert_eq!(config.encoded_end(), Some(0));
    }

    #[test]
    fn test_builder_pattern() {
        let config = StoreConfig::default()
            .with_base(100)
            .with_logical_size(70000);

        assert_eq!(config.base(), 100);
        assert_eq!(config.logical_size(), 70000);
        assert_eq!(config.encoded_end(), Some(100 + encode_size(70000)));
    }

    #[test]
    fn test_invalid_config_overflow() {
        assert!(StoreConfig::new(u64::MAX, 1).is_err());
        assert!(StoreConfig::new(0, u64::MAX).is_err());
        assert!(StoreConfig::new(u64::MAX, 0).is_ok());
    }
}
