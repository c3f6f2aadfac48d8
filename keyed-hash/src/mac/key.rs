#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! HMAC Key Schedule
//!
//! FIPS 198-1 section 4, steps 1-3 and 4/7:
//!
//! - A key longer than the digest's block size is hashed first, then padded.
//! - A key of block size or shorter (including empty) is zero-padded.
//! - ipad = K0 ⊕ 0x3636...36, opad = K0 ⊕ 0x5c5c...5c
//!
//! All derived material is zeroized on drop and redacted from `Debug`.

use crate::digest::DigestBinding;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Inner pad byte.
pub const IPAD: u8 = 0x36;
/// Outer pad byte.
pub const OPAD: u8 = 0x5c;

/// A key reduced to exactly one digest block (`K0` in FIPS 198-1).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct NormalizedKey {
    bytes: Vec<u8>,
}

impl NormalizedKey {
    /// Normalize `raw` for `binding`.
    ///
    /// The result is always `binding.block_size()` bytes, whatever the
    /// length of `raw`.
    #[must_use]
    pub fn new<B: DigestBinding + ?Sized>(raw: &[u8], binding: &B) -> Self {
        let block_size = binding.block_size();
        let mut bytes = if raw.len() > block_size { binding.digest(raw) } else { raw.to_vec() };
        bytes.resize(block_size, 0);
        Self { bytes }
    }

    /// The normalized key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Always equal to the binding's block size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True only for a zero-block-size binding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NormalizedKey([REDACTED; {}])", self.bytes.len())
    }
}

/// Inner and outer pads derived from a [`NormalizedKey`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Pads {
    inner: Vec<u8>,
    outer: Vec<u8>,
}

impl Pads {
    /// XOR every key byte with [`IPAD`] and [`OPAD`].
    #[must_use]
    pub fn derive(key: &NormalizedKey) -> Self {
        let inner = key.as_bytes().iter().map(|b| b ^ IPAD).collect();
        let outer = key.as_bytes().iter().map(|b| b ^ OPAD).collect();
        Self { inner, outer }
    }

    /// `K0 ⊕ ipad`
    #[must_use]
    pub fn inner(&self) -> &[u8] {
        &self.inner
    }

    /// `K0 ⊕ opad`
    #[must_use]
    pub fn outer(&self) -> &[u8] {
        &self.outer
    }
}

impl fmt::Debug for Pads {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pads([REDACTED; {}])", self.inner.len())
    }
}

/// Everything derived from one key assignment.
///
/// The raw key is kept so it can be read back as the engine's current key.
/// The normalized key is dropped (and zeroized) once the pads exist.
#[derive(Clone)]
pub(crate) struct KeySchedule {
    raw: Zeroizing<Vec<u8>>,
    pads: Pads,
}

impl KeySchedule {
    pub(crate) fn new<B: DigestBinding + ?Sized>(raw: &[u8], binding: &B) -> Self {
        let normalized = NormalizedKey::new(raw, binding);
        Self { raw: Zeroizing::new(raw.to_vec()), pads: Pads::derive(&normalized) }
    }

    pub(crate) fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub(crate) fn pads(&self) -> &Pads {
        &self.pads
    }
}
