#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! HMAC Transform
//!
//! The incremental half of HMAC:
//!
//! ```text
//! Idle --consume--> Accumulating --finalize--> Finalized
//!   \___________________finalize_____________/
//! any --reset--> Idle
//! ```
//!
//! The inner digest is only started when the first bytes arrive, at which
//! point the inner pad is absorbed ahead of them. `H(ipad || M)` therefore
//! does not depend on how `M` was split across calls.

use super::key::Pads;
use super::tag::Tag;
use crate::digest::{DigestBinding, DigestState};
use crate::error::{HmacError, Result};

/// Observable phase of an HMAC computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformState {
    /// Nothing consumed since the last reset.
    Idle,
    /// The inner digest has absorbed the inner pad and zero or more message bytes.
    Accumulating,
    /// The tag has been computed and is readable until the next reset.
    Finalized,
}

enum Stage<S> {
    Idle,
    Accumulating(S),
    Finalized(Tag),
}

/// Inner/outer digest driver for one engine.
pub(crate) struct Transform<S> {
    stage: Stage<S>,
}

impl<S: DigestState> Transform<S> {
    pub(crate) fn new() -> Self {
        Self { stage: Stage::Idle }
    }

    pub(crate) fn state(&self) -> TransformState {
        match self.stage {
            Stage::Idle => TransformState::Idle,
            Stage::Accumulating(_) => TransformState::Accumulating,
            Stage::Finalized(_) => TransformState::Finalized,
        }
    }

    /// Drop any partial computation or tag.
    pub(crate) fn reset(&mut self) {
        self.stage = Stage::Idle;
    }

    pub(crate) fn tag(&self) -> Option<&Tag> {
        match &self.stage {
            Stage::Finalized(tag) => Some(tag),
            Stage::Idle | Stage::Accumulating(_) => None,
        }
    }

    /// Append `data` to the inner digest.
    ///
    /// # Errors
    /// `InvalidOperation` once finalized; the stored tag is kept.
    pub(crate) fn consume<B>(&mut self, binding: &B, pads: &Pads, data: &[u8]) -> Result<()>
    where
        B: DigestBinding<State = S> + ?Sized,
    {
        match &mut self.stage {
            Stage::Finalized(_) => {
                Err(HmacError::InvalidOperation("transform already finalized; reset first".into()))
            }
            Stage::Accumulating(inner) => {
                inner.update(data);
                Ok(())
            }
            Stage::Idle => {
                let mut inner = prime(binding, pads);
                inner.update(data);
                self.stage = Stage::Accumulating(inner);
                Ok(())
            }
        }
    }

    /// Absorb `data`, then compute `H(opad || H(ipad || M))`.
    ///
    /// # Errors
    /// `InvalidOperation` if already finalized; the stored tag is kept.
    pub(crate) fn finalize<B>(&mut self, binding: &B, pads: &Pads, data: &[u8]) -> Result<Tag>
    where
        B: DigestBinding<State = S> + ?Sized,
    {
        let mut inner = match std::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::Finalized(tag) => {
                self.stage = Stage::Finalized(tag);
                return Err(HmacError::InvalidOperation(
                    "transform already finalized; reset first".into(),
                ));
            }
            Stage::Accumulating(inner) => inner,
            Stage::Idle => prime(binding, pads),
        };
        inner.update(data);
        let inner_digest = inner.finalize();

        let mut outer = binding.start();
        outer.update(pads.outer());
        outer.update(&inner_digest);
        let tag = Tag::new(outer.finalize());

        self.stage = Stage::Finalized(tag.clone());
        Ok(tag)
    }
}

fn prime<B: DigestBinding + ?Sized>(binding: &B, pads: &Pads) -> B::State {
    let mut inner = binding.start();
    inner.update(pads.inner());
    inner
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;
    use crate::digest::{SHA1, Sha1Binding};
    use crate::mac::key::NormalizedKey;

    type Sha1State = <Sha1Binding as DigestBinding>::State;

    fn pads(key: &[u8]) -> Pads {
        Pads::derive(&NormalizedKey::new(key, &SHA1))
    }

    fn textbook_hmac(key: &[u8], message: &[u8]) -> Vec<u8> {
        let pads = pads(key);
        let mut inner_input = pads.inner().to_vec();
        inner_input.extend_from_slice(message);
        let mut outer_input = pads.outer().to_vec();
        outer_input.extend_from_slice(&SHA1.digest(&inner_input));
        SHA1.digest(&outer_input)
    }

    #[test]
    fn test_finalize_from_idle_matches_definition() {
        let pads = pads(b"key");
        let mut transform = Transform::<Sha1State>::new();
        let tag = transform.finalize(&SHA1, &pads, b"message").unwrap();
        assert_eq!(tag.as_bytes(), textbook_hmac(b"key", b"message").as_slice());
    }

    #[test]
    fn test_state_transitions() {
        let pads = pads(b"key");
        let mut transform = Transform::<Sha1State>::new();
        assert_eq!(transform.state(), TransformState::Idle);
        assert!(transform.tag().is_none());

        transform.consume(&SHA1, &pads, b"abc").unwrap();
        assert_eq!(transform.state(), TransformState::Accumulating);
        assert!(transform.tag().is_none());

        transform.finalize(&SHA1, &pads, b"").unwrap();
        assert_eq!(transform.state(), TransformState::Finalized);
        assert!(transform.tag().is_some());

        transform.reset();
        assert_eq!(transform.state(), TransformState::Idle);
        assert!(transform.tag().is_none());
    }

    #[test]
    fn test_empty_consume_enters_accumulating_without_changing_result() {
        let pads = pads(b"key");
        let mut transform = Transform::<Sha1State>::new();
        transform.consume(&SHA1, &pads, &[]).unwrap();
        assert_eq!(transform.state(), TransformState::Accumulating);
        let tag = transform.finalize(&SHA1, &pads, b"").unwrap();
        assert_eq!(tag.as_bytes(), textbook_hmac(b"key", b"").as_slice());
    }

    #[test]
    fn test_chunk_boundaries_do_not_matter() {
        let pads = pads(b"chunking");
        let message: Vec<u8> = (0..200u8).collect();
        let expected = textbook_hmac(b"chunking", &message);

        for chunk_size in [1, 3, 63, 64, 65, 128, 199] {
            let mut transform = Transform::<Sha1State>::new();
            for chunk in message.chunks(chunk_size) {
                transform.consume(&SHA1, &pads, chunk).unwrap();
            }
            let tag = transform.finalize(&SHA1, &pads, &[]).unwrap();
            assert_eq!(tag.as_bytes(), expected.as_slice(), "chunk size {}", chunk_size);
        }
    }

    #[test]
    fn test_consume_after_finalize_is_rejected_and_keeps_tag() {
        let pads = pads(b"key");
        let mut transform = Transform::<Sha1State>::new();
        let tag = transform.finalize(&SHA1, &pads, b"m").unwrap();

        let err = transform.consume(&SHA1, &pads, b"more").unwrap_err();
        assert!(matches!(err, HmacError::InvalidOperation(_)));
        assert_eq!(transform.state(), TransformState::Finalized);
        assert_eq!(transform.tag(), Some(&tag));
    }

    #[test]
    fn test_double_finalize_is_rejected() {
        let pads = pads(b"key");
        let mut transform = Transform::<Sha1State>::new();
        let tag = transform.finalize(&SHA1, &pads, b"m").unwrap();
        let err = transform.finalize(&SHA1, &pads, b"m").unwrap_err();
        assert!(matches!(err, HmacError::InvalidOperation(_)));
        assert_eq!(transform.tag(), Some(&tag));
    }

    #[test]
    fn test_reset_allows_reuse() {
        let pads = pads(b"key");
        let mut transform = Transform::<Sha1State>::new();
        let first = transform.finalize(&SHA1, &pads, b"one").unwrap();
        transform.reset();
        let second = transform.finalize(&SHA1, &pads, b"two").unwrap();
        transform.reset();
        let again = transform.finalize(&SHA1, &pads, b"one").unwrap();
        assert_ne!(first, second);
        assert_eq!(first, again);
    }
}
