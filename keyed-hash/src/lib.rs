#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # keyed-hash
//!
//! HMAC (FIPS 198-1 / RFC 2104) implemented generically over a pluggable
//! digest, with one-shot, streaming and incremental computation.
//!
//! The digest is supplied as a [`digest::DigestBinding`]. Bindings for SHA-1,
//! the SHA-2 family and SHA3-256/512 are provided over the RustCrypto hashers;
//! anything else can implement the trait.
//!
//! ## Modules
//!
//! - **digest**: the `DigestBinding` seam and RustCrypto bindings
//! - **mac**: key schedule, transform state machine, engine and tags
//! - **config**: stream chunking, key and truncation policy
//! - **error**: `HmacError` and `Result`
//! - **logging**: `tracing` setup and key-safe formatting
//!
//! ## Example
//!
//! ```rust
//! use keyed_hash::{HmacEngine, digest::SHA1};
//!
//! let mut mac = HmacEngine::with_key(&SHA1, &[0xaa; 80]);
//! let tag = mac.compute_full(b"Test Using Larger Than Block-Size Key - Hash Key First")?;
//! assert_eq!(tag.to_hex(), "aa4ae5e15272d00e95705637ce8a3b55ed402112");
//!
//! // The same engine is reusable for further messages
//! let again = mac.compute_from_source(&b"Test Using Larger Than Block-Size Key - Hash Key First"[..])?;
//! assert_eq!(again, tag);
//! # Ok::<(), keyed_hash::HmacError>(())
//! ```

pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod mac;

pub use config::HmacConfig;
pub use error::{HmacError, Result};
pub use mac::{HmacEngine, Tag, TransformState, compute_hmac, verify_hmac};
