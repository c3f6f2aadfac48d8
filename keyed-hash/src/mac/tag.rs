#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Authentication tags.

use std::fmt;
use subtle::ConstantTimeEq;

/// A finalized HMAC value, exactly `output_size` bytes of the bound digest.
///
/// Equality comparisons run in constant time. Comparing against a value of a
/// different length is simply unequal.
#[derive(Clone)]
pub struct Tag {
    bytes: Vec<u8>,
}

impl Tag {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The tag bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Tag length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Only true for a degenerate zero-output binding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The leftmost `len` bytes (RFC 2104 section 5 truncation).
    ///
    /// Asking for more than the full length returns the full tag.
    #[must_use]
    pub fn truncated(&self, len: usize) -> &[u8] {
        &self.bytes[..len.min(self.bytes.len())]
    }

    /// Lowercase hex encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Constant-time comparison against raw bytes.
    #[must_use]
    pub fn ct_matches(&self, other: &[u8]) -> bool {
        self.bytes.as_slice().ct_eq(other).into()
    }

    /// Consume the tag and return its bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.ct_matches(&other.bytes)
    }
}

impl Eq for Tag {}

impl PartialEq<[u8]> for Tag {
    fn eq(&self, other: &[u8]) -> bool {
        self.ct_matches(other)
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Tag {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.ct_matches(other)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.to_hex())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;

    #[test]
    fn test_equality_and_length_mismatch() {
        let tag = Tag::new(vec![1, 2, 3, 4]);
        assert_eq!(tag, [1u8, 2, 3, 4]);
        assert_ne!(tag, [1u8, 2, 3]);
        assert_ne!(tag, Tag::new(vec![1, 2, 3, 5]));
        assert!(tag.ct_matches(&[1, 2, 3, 4]));
        assert!(!tag.ct_matches(&[]));
    }

    #[test]
    fn test_truncation_is_leftmost() {
        let tag = Tag::new((0u8..20).collect());
        assert_eq!(tag.truncated(12), &(0u8..12).collect::<Vec<_>>()[..]);
        assert_eq!(tag.truncated(64).len(), 20);
    }

    #[test]
    fn test_hex_display() {
        let tag = Tag::new(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(tag.to_string(), "deadbeef");
        assert_eq!(format!("{:?}", tag), "Tag(deadbeef)");
    }
}
