#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Criterion benchmarks for the HMAC engine
//!
//! Compares the three ways of driving a computation over the same message
//! so regressions in buffering or per-call overhead show up as a gap
//! between them.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use keyed_hash::digest::{SHA1, SHA256, SHA3_256, SHA512};
use keyed_hash::{HmacConfig, HmacEngine, compute_hmac};
use std::hint::black_box;
use std::io::Cursor;

const SIZES: [usize; 4] = [64, 1024, 16 * 1024, 256 * 1024];

fn bench_one_shot(c: &mut Criterion) {
    let mut group = c.benchmark_group("hmac_sha1_compute_full");
    for size in SIZES {
        let message = vec![0xa5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, message| {
            let mut mac = HmacEngine::with_key(&SHA1, b"benchmark key");
            b.iter(|| black_box(mac.compute_full(black_box(message))));
        });
    }
    group.finish();
}

fn bench_feed_chunks(c: &mut Criterion) {
    let message = vec![0x5au8; 16 * 1024];
    let mut group = c.benchmark_group("hmac_sha1_feed_16k");
    group.throughput(Throughput::Bytes(message.len() as u64));
    for chunk in [1usize, 17, 64, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            let mut mac = HmacEngine::with_key(&SHA1, b"benchmark key");
            b.iter(|| {
                mac.reset();
                for part in message.chunks(chunk) {
                    let _ = mac.feed(black_box(part));
                }
                black_box(mac.finish(&[]))
            });
        });
    }
    group.finish();
}

fn bench_source(c: &mut Criterion) {
    let message = vec![0x3cu8; 256 * 1024];
    let mut group = c.benchmark_group("hmac_sha1_source_256k");
    group.throughput(Throughput::Bytes(message.len() as u64));
    for chunk_size in [512usize, 4096, 65536] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk_size), &chunk_size, |b, &chunk_size| {
            let config = HmacConfig::new().with_stream_chunk_size(chunk_size);
            let Ok(mut mac) = HmacEngine::with_config(&SHA1, config) else {
                return;
            };
            if mac.set_key(Some(b"benchmark key")).is_err() {
                return;
            }
            b.iter(|| black_box(mac.compute_from_source(Cursor::new(&message))));
        });
    }
    group.finish();
}

fn bench_bindings(c: &mut Criterion) {
    let message = vec![0u8; 4096];
    let mut group = c.benchmark_group("hmac_4k_by_digest");
    group.throughput(Throughput::Bytes(message.len() as u64));

    group.bench_function("sha1", |b| b.iter(|| black_box(compute_hmac(&SHA1, b"key", &message))));
    group.bench_function("sha256", |b| b.iter(|| black_box(compute_hmac(&SHA256, b"key", &message))));
    group.bench_function("sha512", |b| b.iter(|| black_box(compute_hmac(&SHA512, b"key", &message))));
    group.bench_function("sha3_256", |b| {
        b.iter(|| black_box(compute_hmac(&SHA3_256, b"key", &message)));
    });
    group.finish();
}

fn bench_key_setup(c: &mut Criterion) {
    let mut group = c.benchmark_group("hmac_sha1_set_key");
    for len in [16usize, 64, 200] {
        let key = vec![0x0bu8; len];
        group.bench_with_input(BenchmarkId::from_parameter(len), &key, |b, key| {
            let mut mac = HmacEngine::new(&SHA1);
            b.iter(|| black_box(mac.set_key(Some(black_box(key.as_slice())))));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_one_shot,
    bench_feed_chunks,
    bench_source,
    bench_bindings,
    bench_key_setup
);
criterion_main!(benches);
