#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Known Answer Test (KAT) Framework
//!
//! Validates the `keyed-hash` engine against published HMAC test vectors.
//!
//! ## Supported Standards
//! - FIPS 198a, Appendix A: HMAC-SHA1
//! - RFC 2202: HMAC-SHA1 test cases 1-7
//! - RFC 4231: HMAC-SHA-224/256/384/512
//!
//! ## Test Vector Format
//!
//! Built-in vectors are embedded as hex strings. Additional sets can be
//! loaded from JSON with [`crate::vector_set::HmacVectorSet`].

pub mod hmac_kat;
pub mod runner;

pub use hmac_kat::{CheckMode, check_by_name, check_vector, is_supported, run_builtin_kats};
pub use runner::{KatRunner, KatSummary};

use keyed_hash::HmacError;
use thiserror::Error;

/// Errors from KAT execution
#[derive(Debug, Error)]
pub enum NistKatError {
    /// Test vector validation failed
    #[error("KAT failed: {algorithm} - {test_name}: {message}")]
    TestFailed {
        /// Algorithm name
        algorithm: String,
        /// Test name
        test_name: String,
        /// Failure message
        message: String,
    },

    /// Hex decoding error
    #[error("Hex decode error: {0}")]
    HexError(String),

    /// The engine refused an operation that should have succeeded
    #[error("Implementation error: {0}")]
    ImplementationError(String),

    /// No binding answers to the requested algorithm name
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A vector set could not be parsed or read
    #[error("Invalid vector set: {0}")]
    InvalidVectorSet(String),
}

impl From<HmacError> for NistKatError {
    fn from(err: HmacError) -> Self {
        Self::ImplementationError(err.to_string())
    }
}

/// Result of running a single KAT test
#[derive(Debug, Clone)]
pub struct KatTestResult {
    /// Test case identifier
    pub test_case: String,
    /// Algorithm being tested
    pub algorithm: String,
    /// Whether the test passed
    pub passed: bool,
    /// Error message if test failed
    pub error_message: Option<String>,
    /// Test execution time in microseconds
    pub execution_time_us: u128,
}

impl KatTestResult {
    /// Create a passed test result
    #[must_use]
    pub fn passed(test_case: String, algorithm: String, execution_time_us: u128) -> Self {
        Self { test_case, algorithm, passed: true, error_message: None, execution_time_us }
    }

    /// Create a failed test result
    #[must_use]
    pub fn failed(test_case: String, algorithm: String, error: String, execution_time_us: u128) -> Self {
        Self { test_case, algorithm, passed: false, error_message: Some(error), execution_time_us }
    }
}

/// Decode a hex string, tolerating surrounding whitespace.
///
/// # Errors
///
/// Returns `NistKatError::HexError` if the input string is not valid hex.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, NistKatError> {
    hex::decode(s.trim()).map_err(|e| NistKatError::HexError(e.to_string()))
}
