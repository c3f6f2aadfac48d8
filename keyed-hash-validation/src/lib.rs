#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! keyed-hash Validation
//!
//! Known-answer testing for the `keyed-hash` HMAC engine.
//!
//! ## Modules
//!
//! - **nist_kat**: built-in FIPS 198a, RFC 2202 and RFC 4231 vectors, the
//!   check modes and the KAT runner
//! - **vector_set**: JSON vector sets loaded at runtime
//!
//! The `hmac-kat` binary runs the built-in vectors plus any JSON sets given
//! on the command line and exits non-zero if anything fails.

pub mod nist_kat;
pub mod vector_set;

pub use nist_kat::{CheckMode, KatRunner, KatSummary, KatTestResult, NistKatError};
pub use vector_set::{HmacVector, HmacVectorSet, run_vector_set};
