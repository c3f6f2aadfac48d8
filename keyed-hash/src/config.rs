//! Configuration for HMAC engines.
//!
//! Tunes how an engine reads streams and which keys and truncated tags it
//! accepts. None of these settings change the value of a computed tag.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use crate::error::{HmacError, Result};
use serde::{Deserialize, Serialize};

/// Default read size for [`crate::HmacEngine::compute_from_source`].
pub const DEFAULT_STREAM_CHUNK_SIZE: usize = 4096;

/// Largest accepted read size (16 MiB).
pub const MAX_STREAM_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// RFC 2104 section 5: truncated outputs should keep at least 80 bits.
pub const DEFAULT_MIN_TRUNCATED_TAG_LEN: usize = 10;

/// HMAC engine configuration.
///
/// # Examples
/// ```rust
/// use keyed_hash::config::HmacConfig;
///
/// let config = HmacConfig::new()
///     .with_stream_chunk_size(64 * 1024)
///     .with_min_key_len(16)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.min_key_len, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HmacConfig {
    /// Bytes requested per read when hashing from a byte source.
    ///
    /// Default: 4096
    pub stream_chunk_size: usize,

    /// Shortest raw key `set_key` accepts.
    ///
    /// FIPS 198-1 permits any key length, including empty, so the default
    /// is 0. Deployments that want to refuse weak keys can raise it.
    pub min_key_len: usize,

    /// Shortest tag `verify_truncated` accepts.
    ///
    /// Verification additionally requires at least half the digest output.
    /// Default: 10 bytes
    pub min_truncated_tag_len: usize,
}

impl Default for HmacConfig {
    fn default() -> Self {
        Self {
            stream_chunk_size: DEFAULT_STREAM_CHUNK_SIZE,
            min_key_len: 0,
            min_truncated_tag_len: DEFAULT_MIN_TRUNCATED_TAG_LEN,
        }
    }
}

impl HmacConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stream read size.
    #[must_use]
    pub fn with_stream_chunk_size(mut self, size: usize) -> Self {
        self.stream_chunk_size = size;
        self
    }

    /// Set the minimum raw key length.
    #[must_use]
    pub fn with_min_key_len(mut self, len: usize) -> Self {
        self.min_key_len = len;
        self
    }

    /// Set the minimum truncated tag length.
    #[must_use]
    pub fn with_min_truncated_tag_len(mut self, len: usize) -> Self {
        self.min_truncated_tag_len = len;
        self
    }

    /// Check every field is in range.
    ///
    /// # Errors
    /// Returns `HmacError::InvalidConfiguration` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.stream_chunk_size == 0 {
            return Err(HmacError::InvalidConfiguration(
                "stream_chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.stream_chunk_size > MAX_STREAM_CHUNK_SIZE {
            return Err(HmacError::InvalidConfiguration(format!(
                "stream_chunk_size {} exceeds maximum {}",
                self.stream_chunk_size, MAX_STREAM_CHUNK_SIZE
            )));
        }
        if self.min_truncated_tag_len == 0 {
            return Err(HmacError::InvalidConfiguration(
                "min_truncated_tag_len must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    /// Returns `HmacError::InvalidConfiguration` if validation fails.
    pub fn build(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}
