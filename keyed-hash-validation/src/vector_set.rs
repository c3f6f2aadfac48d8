#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! JSON Vector Sets
//!
//! External HMAC vectors in a small JSON document:
//!
//! ```json
//! {
//!   "algorithm": "SHA1",
//!   "vectors": [
//!     { "name": "RFC-2202-Test-Case-2", "key": "4a656665",
//!       "message": "7768...3f", "tag": "effc...7c79" }
//!   ]
//! }
//! ```
//!
//! `key`, `message` and `tag` are hex. A `tag` shorter than the digest output
//! is checked against the leftmost bytes of the computed tag.

use crate::nist_kat::hmac_kat::strip_hmac_prefix;
use crate::nist_kat::{CheckMode, KatRunner, NistKatError, check_by_name, decode_hex, is_supported};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// One vector of a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmacVector {
    /// Identifier reported by the runner
    pub name: String,
    /// Hex-encoded key
    pub key: String,
    /// Hex-encoded message
    #[serde(default)]
    pub message: String,
    /// Hex-encoded expected tag, possibly truncated
    pub tag: String,
}

/// A named digest and its vectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmacVectorSet {
    /// Digest name, with or without an `HMAC-` prefix
    pub algorithm: String,
    /// Vectors in file order
    pub vectors: Vec<HmacVector>,
}

impl HmacVectorSet {
    /// Parse and validate a set.
    ///
    /// # Errors
    ///
    /// - `InvalidVectorSet` if the document is malformed or empty
    /// - `UnsupportedAlgorithm` if no digest binding answers to `algorithm`
    /// - `HexError` naming the first vector with a bad field
    pub fn from_json(json: &str) -> Result<Self, NistKatError> {
        let set: Self = serde_json::from_str(json).map_err(|e| NistKatError::InvalidVectorSet(e.to_string()))?;
        set.validate()?;
        Ok(set)
    }

    /// Read and parse a set from disk.
    ///
    /// # Errors
    ///
    /// `InvalidVectorSet` if the file cannot be read, otherwise as for
    /// [`from_json`](Self::from_json).
    pub fn from_file(path: &Path) -> Result<Self, NistKatError> {
        let json = fs::read_to_string(path)
            .map_err(|e| NistKatError::InvalidVectorSet(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Serialize the set as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// `InvalidVectorSet` if serialization fails.
    pub fn to_json(&self) -> Result<String, NistKatError> {
        serde_json::to_string_pretty(self).map_err(|e| NistKatError::InvalidVectorSet(e.to_string()))
    }

    fn validate(&self) -> Result<(), NistKatError> {
        if !is_supported(&self.algorithm) {
            return Err(NistKatError::UnsupportedAlgorithm(self.algorithm.clone()));
        }
        if self.vectors.is_empty() {
            return Err(NistKatError::InvalidVectorSet(format!("{} set has no vectors", self.algorithm)));
        }
        for vector in &self.vectors {
            for (field, value) in [("key", &vector.key), ("message", &vector.message), ("tag", &vector.tag)] {
                decode_hex(value)
                    .map_err(|e| NistKatError::HexError(format!("{} {field}: {e}", vector.name)))?;
            }
        }
        Ok(())
    }
}

/// Run every vector of `set` in each of `modes`, recording one result per
/// vector and mode.
pub fn run_vector_set(set: &HmacVectorSet, modes: &[CheckMode], runner: &mut KatRunner) {
    let algorithm = format!("HMAC-{}", strip_hmac_prefix(&set.algorithm));
    info!(algorithm = %algorithm, vectors = set.vectors.len(), modes = modes.len(), "running vector set");

    for vector in &set.vectors {
        for &mode in modes {
            runner.run_test(&format!("{} [{mode}]", vector.name), &algorithm, || {
                check_by_name(
                    &set.algorithm,
                    &vector.name,
                    &decode_hex(&vector.key)?,
                    &decode_hex(&vector.message)?,
                    &decode_hex(&vector.tag)?,
                    mode,
                )
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;

    const JEFE: &str = r#"{
        "algorithm": "HMAC-SHA1",
        "vectors": [
            {
                "name": "jefe",
                "key": "4a656665",
                "message": "7768617420646f2079612077616e7420666f72206e6f7468696e673f",
                "tag": "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"
            }
        ]
    }"#;

    #[test]
    fn test_parse_and_run() {
        let set = HmacVectorSet::from_json(JEFE).unwrap();
        assert_eq!(set.vectors.len(), 1);

        let mut runner = KatRunner::new();
        run_vector_set(&set, &CheckMode::ALL, &mut runner);
        let summary = runner.finish();
        assert_eq!(summary.total, 5);
        assert!(summary.all_passed());
        assert!(summary.results.iter().all(|r| r.algorithm == "HMAC-SHA1"));
    }

    #[test]
    fn test_wrong_tag_is_a_failed_result() {
        let set = HmacVectorSet::from_json(&JEFE.replace("effcdf", "000000")).unwrap();
        let mut runner = KatRunner::new();
        run_vector_set(&set, &[CheckMode::OneShot], &mut runner);
        assert_eq!(runner.summary().failed, 1);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(HmacVectorSet::from_json("{"), Err(NistKatError::InvalidVectorSet(_))));
        assert!(matches!(
            HmacVectorSet::from_json(&JEFE.replace("HMAC-SHA1", "MD5")),
            Err(NistKatError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            HmacVectorSet::from_json(r#"{"algorithm": "SHA256", "vectors": []}"#),
            Err(NistKatError::InvalidVectorSet(_))
        ));
        assert!(matches!(
            HmacVectorSet::from_json(&JEFE.replace("4a656665", "4a65666")),
            Err(NistKatError::HexError(ref msg)) if msg.contains("jefe key")
        ));
    }

    #[test]
    fn test_message_defaults_to_empty() {
        let json = r#"{"algorithm": "SHA1", "vectors": [
            {"name": "empty", "key": "", "tag": "fbdb1d1b18aa6c08324b7d64b71fb76370690e1d"}
        ]}"#;
        let set = HmacVectorSet::from_json(json).unwrap();
        assert!(set.vectors[0].message.is_empty());

        let mut runner = KatRunner::new();
        run_vector_set(&set, &CheckMode::ALL, &mut runner);
        assert!(runner.summary().all_passed());
    }

    #[test]
    fn test_json_roundtrip() {
        let set = HmacVectorSet::from_json(JEFE).unwrap();
        let reparsed = HmacVectorSet::from_json(&set.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, set);
    }
}
