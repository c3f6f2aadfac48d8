#![deny(unsafe_code)]
#![no_main]

//! Fuzz testing for HMAC chunking equivalence
//!
//! The first input byte picks a key length and the second a feed chunk
//! size; the rest is split into key and message. One-shot, chunked feed
//! and reader-driven computation must agree for every digest.

use keyed_hash::digest::{DigestBinding, SHA1, SHA256, SHA3_256, SHA512};
use keyed_hash::{HmacConfig, HmacEngine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let [key_len, chunk, rest @ ..] = data else {
        return;
    };
    let split = usize::from(*key_len).min(rest.len());
    let (key, message) = rest.split_at(split);
    let chunk = usize::from(*chunk).max(1);

    check_modes(&SHA1, key, message, chunk);
    check_modes(&SHA256, key, message, chunk);
    check_modes(&SHA512, key, message, chunk);
    check_modes(&SHA3_256, key, message, chunk);
});

fn check_modes<B: DigestBinding>(binding: &B, key: &[u8], message: &[u8], chunk: usize) {
    let mut mac = HmacEngine::with_key(binding, key);
    let Ok(one_shot) = mac.compute_full(message) else {
        panic!("keyed engine must compute");
    };
    assert_eq!(one_shot.len(), binding.output_size());

    mac.reset();
    for part in message.chunks(chunk) {
        assert!(mac.feed(part).is_ok());
    }
    assert_eq!(mac.finish(&[]).ok().as_ref(), Some(&one_shot), "chunked feed must match one-shot");

    let config = HmacConfig::new().with_stream_chunk_size(chunk);
    let Ok(mut streaming) = HmacEngine::with_config(binding, config) else {
        panic!("chunk size in 1..=255 is valid");
    };
    assert!(streaming.set_key(Some(key)).is_ok());
    assert_eq!(streaming.compute_from_source(message).ok().as_ref(), Some(&one_shot), "stream must match one-shot");

    // Finalized engines refuse more input and keep their tag
    assert!(mac.feed(message).is_err());
    assert_eq!(mac.tag().ok(), Some(&one_shot));
}
