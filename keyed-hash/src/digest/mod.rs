#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Digest Bindings
//!
//! The HMAC engine never hashes anything itself. It is parameterized over a
//! [`DigestBinding`]: a descriptor for a fixed-output hash function carrying
//! its block size, output size and canonical name, plus a way to start an
//! incremental computation.
//!
//! Bindings are passed to the engine explicitly. There is no global registry
//! and no lookup by name; the name is metadata used to check declared
//! algorithm names against what is actually wired in.
//!
//! Concrete bindings over the RustCrypto hashers live in [`bindings`].

pub mod bindings;

pub use bindings::*;

/// An in-progress digest computation.
pub trait DigestState {
    /// Absorb `data`. Any chunking of the same bytes yields the same digest.
    fn update(&mut self, data: &[u8]);

    /// Finish the computation and return exactly `output_size` bytes.
    fn finalize(self) -> Vec<u8>;
}

/// A fixed-output-size hash function usable underneath HMAC.
pub trait DigestBinding {
    /// Incremental state produced by [`DigestBinding::start`].
    type State: DigestState;

    /// Stable identifier such as `"SHA1"` or `"SHA256"`.
    fn canonical_name(&self) -> &'static str;

    /// Other names that refer to the same function (e.g. `"SHA-1"`).
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Bytes consumed per compression round (64 for SHA-1 and SHA-256).
    fn block_size(&self) -> usize;

    /// Digest length in bytes (20 for SHA-1).
    fn output_size(&self) -> usize;

    /// Start a fresh incremental computation.
    fn start(&self) -> Self::State;

    /// One-shot digest of `data`.
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        let mut state = self.start();
        state.update(data);
        state.finalize()
    }

    /// Whether `name` refers to this binding, ignoring ASCII case.
    fn accepts_name(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(self.canonical_name())
            || self.aliases().iter().any(|alias| name.eq_ignore_ascii_case(alias))
    }
}
