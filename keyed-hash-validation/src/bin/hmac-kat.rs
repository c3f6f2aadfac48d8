#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![allow(clippy::print_stderr)]

//! Run the built-in HMAC known-answer tests, plus any JSON vector sets
//! passed as arguments.
//!
//! ```text
//! hmac-kat [VECTOR_SET.json ...]
//! ```
//!
//! Exit status is 0 when every test passes, 1 when any test fails and 2 when
//! a vector set cannot be loaded. Set `RUST_LOG=keyed_hash=debug` for
//! per-computation traces.

use keyed_hash::logging::init_tracing;
use keyed_hash_validation::nist_kat::run_builtin_kats;
use keyed_hash_validation::{CheckMode, HmacVectorSet, KatRunner, run_vector_set};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("warning: tracing not initialized: {e}");
    }

    let mut runner = KatRunner::new();
    run_builtin_kats(&mut runner);

    for path in std::env::args_os().skip(1).map(PathBuf::from) {
        match HmacVectorSet::from_file(&path) {
            Ok(set) => run_vector_set(&set, &CheckMode::ALL, &mut runner),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(2);
            }
        }
    }

    let summary = runner.finish();
    summary.print();
    if summary.all_passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
