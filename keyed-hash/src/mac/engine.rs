#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! HMAC Engine
//!
//! The public face of the crate. An [`HmacEngine`] borrows a
//! [`DigestBinding`], owns one key schedule and one transform, and can compute
//! any number of independent tags over its lifetime:
//!
//! - [`HmacEngine::compute_full`] for messages already in memory
//! - [`HmacEngine::compute_from_source`] for anything implementing [`Read`]
//! - [`HmacEngine::feed`] / [`HmacEngine::finish`] for callers interleaving
//!   their own I/O with hashing
//!
//! Every mode produces the same tag for the same key and bytes.
//!
//! # Example
//! ```rust
//! use keyed_hash::{HmacEngine, digest::SHA1};
//!
//! let mut mac = HmacEngine::with_key(&SHA1, b"Jefe");
//! let tag = mac.compute_full(b"what do ya want for nothing?")?;
//! assert_eq!(tag.to_hex(), "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
//!
//! mac.feed(b"what do ya ")?;
//! let streamed = mac.finish(b"want for nothing?")?;
//! assert_eq!(streamed, tag);
//! # Ok::<(), keyed_hash::HmacError>(())
//! ```

use super::key::KeySchedule;
use super::tag::Tag;
use super::transform::{Transform, TransformState};
use crate::config::HmacConfig;
use crate::digest::DigestBinding;
use crate::error::{HmacError, Result};
use crate::logging::sanitize_data;
use std::fmt;
use std::io::{ErrorKind, Read};
use subtle::ConstantTimeEq;
use tracing::{debug, instrument, warn};

/// HMAC over the digest described by `B`.
///
/// Not internally synchronized: every mutating call takes `&mut self`. Use
/// one engine per concurrent computation.
pub struct HmacEngine<'b, B: DigestBinding + ?Sized> {
    binding: &'b B,
    config: HmacConfig,
    schedule: Option<KeySchedule>,
    transform: Transform<B::State>,
    hash_name: String,
}

impl<'b, B: DigestBinding + ?Sized> HmacEngine<'b, B> {
    /// Create an engine with no key.
    ///
    /// Computations fail with [`HmacError::InvalidKey`] until
    /// [`set_key`](Self::set_key) succeeds. No key is ever generated
    /// implicitly.
    #[must_use]
    pub fn new(binding: &'b B) -> Self {
        Self {
            binding,
            config: HmacConfig::default(),
            schedule: None,
            transform: Transform::new(),
            hash_name: binding.canonical_name().to_string(),
        }
    }

    /// Create an engine keyed with `key` under the default configuration.
    #[must_use]
    pub fn with_key(binding: &'b B, key: &[u8]) -> Self {
        let mut engine = Self::new(binding);
        engine.schedule = Some(KeySchedule::new(key, binding));
        engine
    }

    /// Create an unkeyed engine with a custom configuration.
    ///
    /// # Errors
    /// Returns `HmacError::InvalidConfiguration` if `config` does not validate.
    pub fn with_config(binding: &'b B, config: HmacConfig) -> Result<Self> {
        config.validate()?;
        let mut engine = Self::new(binding);
        engine.config = config;
        Ok(engine)
    }

    /// Assign a new key and return to `Idle`.
    ///
    /// Any in-progress or finalized computation is discarded.
    ///
    /// # Errors
    /// Returns `HmacError::InvalidKey` if `key` is `None` or shorter than
    /// `config.min_key_len`. The previous key and state are left untouched.
    pub fn set_key(&mut self, key: Option<&[u8]>) -> Result<()> {
        let Some(raw) = key else {
            warn!(algorithm = self.binding.canonical_name(), "rejected absent HMAC key");
            return Err(HmacError::InvalidKey("key must not be absent".to_string()));
        };
        if raw.len() < self.config.min_key_len {
            warn!(
                algorithm = self.binding.canonical_name(),
                key_len = raw.len(),
                min_key_len = self.config.min_key_len,
                "rejected short HMAC key"
            );
            return Err(HmacError::InvalidKey(format!(
                "key is {} bytes, minimum is {}",
                raw.len(),
                self.config.min_key_len
            )));
        }

        self.schedule = Some(KeySchedule::new(raw, self.binding));
        self.transform.reset();
        debug!(
            algorithm = self.binding.canonical_name(),
            key = %sanitize_data(raw),
            hashed = raw.len() > self.binding.block_size(),
            "HMAC key assigned"
        );
        Ok(())
    }

    /// The raw key most recently assigned, if any.
    #[must_use]
    pub fn key(&self) -> Option<&[u8]> {
        self.schedule.as_ref().map(KeySchedule::raw)
    }

    /// Declare the hash algorithm this engine is expected to use.
    ///
    /// The binding itself never changes. If `name` does not describe it, the
    /// next computation fails with [`HmacError::BindingMismatch`]; declaring
    /// a matching name again clears the condition.
    pub fn rebind(&mut self, name: &str) {
        self.hash_name = name.to_string();
    }

    /// The most recently declared hash name.
    #[must_use]
    pub fn hash_name(&self) -> &str {
        &self.hash_name
    }

    /// Canonical name of the bound digest.
    #[must_use]
    pub fn canonical_name(&self) -> &'static str {
        self.binding.canonical_name()
    }

    /// The bound digest.
    #[must_use]
    pub fn binding(&self) -> &'b B {
        self.binding
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &HmacConfig {
        &self.config
    }

    /// Tag length in bytes.
    #[must_use]
    pub fn output_size(&self) -> usize {
        self.binding.output_size()
    }

    /// Tag length in bits (160 for HMAC-SHA1).
    #[must_use]
    pub fn hash_size_bits(&self) -> usize {
        self.binding.output_size() * 8
    }

    /// Block size of the underlying digest, which sets the pad length.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.binding.block_size()
    }

    /// Input granularity. Always 1: `feed` accepts any number of bytes.
    #[must_use]
    pub const fn input_block_size(&self) -> usize {
        1
    }

    /// Output granularity. Always 1.
    #[must_use]
    pub const fn output_block_size(&self) -> usize {
        1
    }

    /// Always true: `reset` (or any one-shot call) starts a fresh computation.
    #[must_use]
    pub const fn can_reuse_transform(&self) -> bool {
        true
    }

    /// Always true: a single `feed` may span many digest blocks.
    #[must_use]
    pub const fn can_transform_multiple_blocks(&self) -> bool {
        true
    }

    /// Current transform phase.
    #[must_use]
    pub fn state(&self) -> TransformState {
        self.transform.state()
    }

    /// Discard any partial computation or tag and return to `Idle`.
    pub fn reset(&mut self) {
        self.transform.reset();
    }

    /// The tag of the last finished computation.
    ///
    /// # Errors
    /// Returns `HmacError::InvalidOperation` unless the engine is `Finalized`.
    pub fn tag(&self) -> Result<&Tag> {
        self.transform.tag().ok_or_else(|| {
            HmacError::InvalidOperation("no tag available before finalization".to_string())
        })
    }

    /// Append message bytes to the current computation.
    ///
    /// # Errors
    /// - `BindingMismatch` if the declared hash name does not match the binding
    /// - `InvalidKey` if no key has been set
    /// - `InvalidOperation` if the engine is `Finalized`; call `reset` first
    pub fn feed(&mut self, data: &[u8]) -> Result<()> {
        self.ensure_binding()?;
        let schedule = self.schedule.as_ref().ok_or_else(missing_key)?;
        self.transform.consume(self.binding, schedule.pads(), data).inspect_err(|err| {
            warn!(algorithm = self.binding.canonical_name(), error = %err, "feed rejected");
        })
    }

    /// Append `last` and finish the computation.
    ///
    /// The tag stays readable through [`tag`](Self::tag) until the next reset.
    ///
    /// # Errors
    /// Same conditions as [`feed`](Self::feed).
    #[instrument(level = "debug", skip(self, last), fields(algorithm = self.binding.canonical_name(), last_len = last.len()))]
    pub fn finish(&mut self, last: &[u8]) -> Result<Tag> {
        self.ensure_binding()?;
        let schedule = self.schedule.as_ref().ok_or_else(missing_key)?;
        self.transform.finalize(self.binding, schedule.pads(), last).inspect_err(|err| {
            warn!(error = %err, "finish rejected");
        })
    }

    /// Authenticate `message` from a clean state.
    ///
    /// Equivalent to `reset()` followed by `finish(message)`; any
    /// computation already in progress is discarded.
    ///
    /// # Errors
    /// `BindingMismatch` or `InvalidKey`.
    #[instrument(level = "debug", skip(self, message), fields(algorithm = self.binding.canonical_name(), message_len = message.len()))]
    pub fn compute_full(&mut self, message: &[u8]) -> Result<Tag> {
        self.ensure_binding()?;
        let schedule = self.schedule.as_ref().ok_or_else(missing_key)?;
        self.transform.reset();
        self.transform.finalize(self.binding, schedule.pads(), message)
    }

    /// Authenticate everything `source` yields until end of stream.
    ///
    /// Reads in `config.stream_chunk_size` chunks and retries interrupted
    /// reads. The result equals `compute_full` over the same bytes however
    /// the source splits them.
    ///
    /// # Errors
    /// `BindingMismatch` or `InvalidKey` as for `compute_full`, or
    /// `HmacError::Io` if the source fails. After an I/O failure the engine
    /// is back in `Idle`.
    #[instrument(level = "debug", skip(self, source), fields(algorithm = self.binding.canonical_name()))]
    pub fn compute_from_source<R: Read>(&mut self, mut source: R) -> Result<Tag> {
        self.ensure_binding()?;
        let schedule = self.schedule.as_ref().ok_or_else(missing_key)?;
        self.transform.reset();

        let mut buf = vec![0u8; self.config.stream_chunk_size];
        let mut total: u64 = 0;
        loop {
            let read = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.transform.reset();
                    warn!(error = %err, bytes_read = total, "message source failed");
                    return Err(err.into());
                }
            };
            let Some(chunk) = buf.get(..read) else {
                self.transform.reset();
                return Err(HmacError::Io(format!(
                    "source reported {} bytes for a {} byte buffer",
                    read,
                    buf.len()
                )));
            };
            self.transform.consume(self.binding, schedule.pads(), chunk)?;
            total = total.saturating_add(read as u64);
        }

        debug!(bytes = total, "message source exhausted");
        self.transform.finalize(self.binding, schedule.pads(), &[])
    }

    /// Recompute the tag over `message` and compare with `expected` in
    /// constant time.
    ///
    /// A wrong-length `expected` is simply `false`. Runs through
    /// [`compute_full`](Self::compute_full), so any computation in progress
    /// is discarded and [`tag`](Self::tag) afterwards returns the recomputed
    /// tag.
    ///
    /// # Errors
    /// `BindingMismatch` or `InvalidKey`.
    pub fn verify(&mut self, message: &[u8], expected: &[u8]) -> Result<bool> {
        let tag = self.compute_full(message)?;
        Ok(tag.ct_matches(expected))
    }

    /// Verify a tag truncated to its leftmost bytes (RFC 2104 section 5).
    ///
    /// `expected` must be at least half the output size and at least
    /// `config.min_truncated_tag_len` bytes (capped at the output size).
    /// Longer than the full output is `false`. Discards any computation in
    /// progress and replaces the stored tag, as [`verify`](Self::verify) does.
    ///
    /// # Errors
    /// `BindingMismatch` or `InvalidKey` before any length check, then
    /// `TagLength` if `expected` is too short.
    pub fn verify_truncated(&mut self, message: &[u8], expected: &[u8]) -> Result<bool> {
        self.ensure_binding()?;
        if self.schedule.is_none() {
            return Err(missing_key());
        }
        let output = self.output_size();
        let minimum = self.config.min_truncated_tag_len.max(output.div_ceil(2)).min(output);
        if expected.len() < minimum {
            return Err(HmacError::TagLength { actual: expected.len(), minimum });
        }
        if expected.len() > output {
            return Ok(false);
        }
        let tag = self.compute_full(message)?;
        Ok(tag.truncated(expected.len()).ct_eq(expected).into())
    }

    fn ensure_binding(&self) -> Result<()> {
        if self.binding.accepts_name(&self.hash_name) {
            return Ok(());
        }
        warn!(
            declared = %self.hash_name,
            bound = self.binding.canonical_name(),
            "declared hash name does not match digest binding"
        );
        Err(HmacError::BindingMismatch {
            declared: self.hash_name.clone(),
            bound: self.binding.canonical_name(),
        })
    }
}

fn missing_key() -> HmacError {
    HmacError::InvalidKey("no key has been set".to_string())
}

impl<B: DigestBinding + ?Sized> fmt::Display for HmacEngine<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HMAC-{}", self.binding.canonical_name())
    }
}

impl<B: DigestBinding + ?Sized> fmt::Debug for HmacEngine<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacEngine")
            .field("algorithm", &self.binding.canonical_name())
            .field("hash_name", &self.hash_name)
            .field("keyed", &self.schedule.is_some())
            .field("state", &self.state())
            .finish()
    }
}

/// One-shot HMAC of `data` under `key`.
///
/// # Errors
/// Never fails for a fresh computation; the `Result` mirrors the engine API.
pub fn compute_hmac<B: DigestBinding + ?Sized>(binding: &B, key: &[u8], data: &[u8]) -> Result<Tag> {
    let schedule = KeySchedule::new(key, binding);
    Transform::new().finalize(binding, schedule.pads(), data)
}

/// Constant-time check of `tag` against the HMAC of `data` under `key`.
#[must_use]
pub fn verify_hmac<B: DigestBinding + ?Sized>(
    binding: &B,
    key: &[u8],
    data: &[u8],
    tag: &[u8],
) -> bool {
    match compute_hmac(binding, key, data) {
        Ok(computed) => computed.ct_matches(tag),
        Err(_) => false,
    }
}
