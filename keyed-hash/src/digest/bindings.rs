#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! RustCrypto Digest Bindings
//!
//! Adapts the audited RustCrypto hashers (`sha1`, `sha2`, `sha3`) to
//! [`DigestBinding`]. Block and output sizes come from the hasher's type-level
//! constants, so they cannot drift from the implementation.
//!
//! | Binding | Block | Output |
//! |---------|-------|--------|
//! | [`SHA1`] | 64 | 20 |
//! | [`SHA224`] | 64 | 28 |
//! | [`SHA256`] | 64 | 32 |
//! | [`SHA384`] | 128 | 48 |
//! | [`SHA512`] | 128 | 64 |
//! | [`SHA3_256`] | 136 | 32 |
//! | [`SHA3_512`] | 72 | 64 |

use super::{DigestBinding, DigestState};
use ::digest::Digest;
use ::digest::core_api::BlockSizeUser;
use std::fmt;
use std::marker::PhantomData;

/// Binding over any RustCrypto hasher `D`.
pub struct HashBinding<D> {
    name: &'static str,
    aliases: &'static [&'static str],
    _hasher: PhantomData<fn() -> D>,
}

impl<D> HashBinding<D> {
    /// Create a binding with a canonical name and alternative names.
    #[must_use]
    pub const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases, _hasher: PhantomData }
    }
}

impl<D> Clone for HashBinding<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for HashBinding<D> {}

impl<D> fmt::Debug for HashBinding<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashBinding").field("name", &self.name).finish()
    }
}

/// Incremental state wrapping a RustCrypto hasher.
#[derive(Clone)]
pub struct HashState<D>(D);

impl<D: Digest> DigestState for HashState<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self) -> Vec<u8> {
        self.0.finalize().to_vec()
    }
}

impl<D: Digest + BlockSizeUser> DigestBinding for HashBinding<D> {
    type State = HashState<D>;

    fn canonical_name(&self) -> &'static str {
        self.name
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    fn block_size(&self) -> usize {
        <D as BlockSizeUser>::block_size()
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn start(&self) -> Self::State {
        HashState(<D as Digest>::new())
    }
}

/// SHA-1 binding type.
pub type Sha1Binding = HashBinding<sha1::Sha1>;
/// SHA-224 binding type.
pub type Sha224Binding = HashBinding<sha2::Sha224>;
/// SHA-256 binding type.
pub type Sha256Binding = HashBinding<sha2::Sha256>;
/// SHA-384 binding type.
pub type Sha384Binding = HashBinding<sha2::Sha384>;
/// SHA-512 binding type.
pub type Sha512Binding = HashBinding<sha2::Sha512>;
/// SHA3-256 binding type.
pub type Sha3_256Binding = HashBinding<sha3::Sha3_256>;
/// SHA3-512 binding type.
pub type Sha3_512Binding = HashBinding<sha3::Sha3_512>;

/// SHA-1 (FIPS 180-4). Legacy; kept for HMAC-SHA1 interoperability.
pub const SHA1: Sha1Binding = HashBinding::new("SHA1", &["SHA", "SHA-1"]);
/// SHA-224 (FIPS 180-4)
pub const SHA224: Sha224Binding = HashBinding::new("SHA224", &["SHA-224"]);
/// SHA-256 (FIPS 180-4)
pub const SHA256: Sha256Binding = HashBinding::new("SHA256", &["SHA-256"]);
/// SHA-384 (FIPS 180-4)
pub const SHA384: Sha384Binding = HashBinding::new("SHA384", &["SHA-384"]);
/// SHA-512 (FIPS 180-4)
pub const SHA512: Sha512Binding = HashBinding::new("SHA512", &["SHA-512"]);
/// SHA3-256 (FIPS 202)
pub const SHA3_256: Sha3_256Binding = HashBinding::new("SHA3-256", &["SHA3_256"]);
/// SHA3-512 (FIPS 202)
pub const SHA3_512: Sha3_512Binding = HashBinding::new("SHA3-512", &["SHA3_512"]);

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_block_and_output_sizes() {
        assert_eq!((SHA1.block_size(), SHA1.output_size()), (64, 20));
        assert_eq!((SHA224.block_size(), SHA224.output_size()), (64, 28));
        assert_eq!((SHA256.block_size(), SHA256.output_size()), (64, 32));
        assert_eq!((SHA384.block_size(), SHA384.output_size()), (128, 48));
        assert_eq!((SHA512.block_size(), SHA512.output_size()), (128, 64));
        assert_eq!((SHA3_256.block_size(), SHA3_256.output_size()), (136, 32));
        assert_eq!((SHA3_512.block_size(), SHA3_512.output_size()), (72, 64));
    }

    #[test]
    fn test_sha1_abc() {
        // FIPS 180-4 example
        assert_eq!(SHA1.digest(b"abc"), hex!("a9993e364706816aba3e25717850c26c9cd0d89d"));
    }

    #[test]
    fn test_sha256_empty() {
        let expected = hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
        assert_eq!(SHA256.digest(b""), expected);
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let data = b"The quick brown fox jumps over the lazy dog";
        let mut state = SHA1.start();
        for chunk in data.chunks(7) {
            state.update(chunk);
        }
        assert_eq!(state.finalize(), SHA1.digest(data));
    }

    #[test]
    fn test_accepts_name_is_case_insensitive() {
        assert!(SHA1.accepts_name("SHA1"));
        assert!(SHA1.accepts_name("sha1"));
        assert!(SHA1.accepts_name("SHA-1"));
        assert!(SHA1.accepts_name("sha"));
        assert!(!SHA1.accepts_name("MD5"));
        assert!(!SHA1.accepts_name("SHA256"));
        assert!(SHA3_256.accepts_name("sha3_256"));
    }

    #[test]
    fn test_debug_shows_name_only() {
        assert_eq!(format!("{:?}", SHA256), "HashBinding { name: \"SHA256\" }");
    }
}
