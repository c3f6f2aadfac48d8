#![deny(unsafe_code)]
#![no_main]

//! Fuzz testing for HMAC verification
//!
//! Arbitrary candidate tags must never crash verification, genuine tags
//! (full or truncated to a permitted length) must verify, and any single
//! flipped bit must be rejected.

use keyed_hash::digest::SHA1;
use keyed_hash::{HmacEngine, HmacError, verify_hmac};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 24 {
        return;
    }

    let key = &data[..16];
    let message = &data[16..];
    let candidate = data.get(..20).unwrap_or(data);

    let mut mac = HmacEngine::with_key(&SHA1, key);
    let Ok(tag) = mac.compute_full(message) else {
        return;
    };

    assert!(verify_hmac(&SHA1, key, message, tag.as_bytes()), "valid HMAC must verify");
    assert_eq!(mac.verify(message, tag.as_bytes()).ok(), Some(true));
    let _ = mac.verify(message, candidate);

    for len in 0..=tag.len() {
        match mac.verify_truncated(message, tag.truncated(len)) {
            Ok(accepted) => assert!(accepted && len >= 10, "prefix of {len} bytes"),
            Err(HmacError::TagLength { actual, minimum }) => assert!(actual == len && len < minimum),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let bit = usize::from(data[0]) % (tag.len() * 8);
    let mut corrupted = tag.as_bytes().to_vec();
    corrupted[bit / 8] ^= 1u8 << (bit % 8);
    assert!(!verify_hmac(&SHA1, key, message, &corrupted), "corrupted tag must fail verification");
    assert_eq!(mac.verify_truncated(message, &corrupted[..12]).ok(), Some(corrupted[..12] == tag.as_bytes()[..12]));
});
