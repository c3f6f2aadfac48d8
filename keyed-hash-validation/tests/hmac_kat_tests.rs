#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
//! KAT Runner Integration Tests
//!
//! Drives the built-in vector tables and the JSON sets shipped in
//! `vectors/` through the runner, the same way the `hmac-kat` binary does.

use keyed_hash::compute_hmac;
use keyed_hash::digest::{SHA1, SHA256, SHA3_256};
use keyed_hash_validation::nist_kat::hmac_kat::{
    HMAC_SHA1_VECTORS, HMAC_VECTORS, run_hmac_sha1_kat, run_hmac_sha2_kat,
};
use keyed_hash_validation::nist_kat::{check_by_name, check_vector, run_builtin_kats};
use keyed_hash_validation::{CheckMode, HmacVectorSet, KatRunner, NistKatError, run_vector_set};
use proptest::prelude::*;

const RFC2202_SHA1: &str = include_str!("../vectors/rfc2202_sha1.json");
const RFC4231_SHA256: &str = include_str!("../vectors/rfc4231_sha256.json");
const SHA3_256_SET: &str = include_str!("../vectors/sha3_256.json");

#[test]
fn test_builtin_kats_pass() {
    run_hmac_sha1_kat().unwrap();
    run_hmac_sha2_kat().unwrap();
}

#[test]
fn test_builtin_kats_through_runner() {
    let mut runner = KatRunner::new();
    run_builtin_kats(&mut runner);
    let summary = runner.finish();

    let expected_total = (HMAC_SHA1_VECTORS.len() + HMAC_VECTORS.len() * 4) * CheckMode::ALL.len();
    assert_eq!(summary.total, expected_total);
    assert!(summary.all_passed(), "failures: {:?}", summary.failures().collect::<Vec<_>>());
    assert!((summary.pass_rate() - 100.0).abs() < f64::EPSILON);

    let algorithms: Vec<&str> = summary.by_algorithm().keys().copied().collect();
    assert_eq!(algorithms, ["HMAC-SHA1", "HMAC-SHA224", "HMAC-SHA256", "HMAC-SHA384", "HMAC-SHA512"]);
}

#[test]
fn test_shipped_vector_sets_pass() {
    let mut runner = KatRunner::new();
    for json in [RFC2202_SHA1, RFC4231_SHA256, SHA3_256_SET] {
        let set = HmacVectorSet::from_json(json).unwrap();
        run_vector_set(&set, &CheckMode::ALL, &mut runner);
    }
    let summary = runner.finish();
    assert_eq!(summary.total, (7 + 4 + 4) * 5);
    assert!(summary.all_passed(), "failures: {:?}", summary.failures().collect::<Vec<_>>());
}

#[test]
fn test_vector_set_loaded_from_disk() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("vectors/rfc2202_sha1.json");
    let set = HmacVectorSet::from_file(&path).unwrap();
    assert_eq!(set.algorithm, "SHA1");
    assert_eq!(set, HmacVectorSet::from_json(RFC2202_SHA1).unwrap());

    let missing = path.with_file_name("does-not-exist.json");
    assert!(matches!(HmacVectorSet::from_file(&missing), Err(NistKatError::InvalidVectorSet(_))));
}

#[test]
fn test_corrupted_set_reports_each_mode() {
    let set = HmacVectorSet::from_json(&RFC2202_SHA1.replace("b617318655057264", "b617318655057265")).unwrap();
    let mut runner = KatRunner::new();
    run_vector_set(&set, &CheckMode::ALL, &mut runner);
    let summary = runner.finish();

    assert_eq!(summary.failed, CheckMode::ALL.len());
    for (failure, mode) in summary.failures().zip(CheckMode::ALL) {
        assert_eq!(failure.test_case, format!("RFC-2202-Test-Case-1 [{mode}]"));
        assert!(failure.error_message.as_deref().unwrap().contains("expected b617318655057265"));
    }
}

#[test]
fn test_truncated_sha2_vector_below_policy_still_checks_prefix() {
    // The runner compares prefixes; only the engine's verify_truncated
    // enforces a minimum length.
    let key = [0x0c; 20];
    let expected = hex_literal::hex!("a3b6167473100ee06e0c796c2955552b");
    check_vector(&SHA256, "RFC-4231-Test-Case-5", &key, b"Test With Truncation", &expected, CheckMode::ByteWise)
        .unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn engine_tags_pass_every_mode(
        key in prop::collection::vec(any::<u8>(), 0..200),
        message in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        let tag = compute_hmac(&SHA3_256, &key, &message).unwrap();
        for mode in CheckMode::ALL {
            prop_assert!(check_vector(&SHA3_256, "prop", &key, &message, tag.as_bytes(), mode).is_ok());
        }
    }

    #[test]
    fn flipped_bits_fail_every_mode(
        key in prop::collection::vec(any::<u8>(), 0..100),
        message in prop::collection::vec(any::<u8>(), 0..100),
        bit in 0usize..160,
    ) {
        let mut tag = compute_hmac(&SHA1, &key, &message).unwrap().into_vec();
        tag[bit / 8] ^= 1u8 << (bit % 8);
        for mode in CheckMode::ALL {
            let result = check_by_name("HMAC-SHA1", "prop", &key, &message, &tag, mode);
            let is_test_failure = matches!(result, Err(NistKatError::TestFailed { .. }));
            prop_assert!(is_test_failure);
        }
    }
}
