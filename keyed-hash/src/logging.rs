//! # Logging
//!
//! Structured logging for keyed-hash through `tracing`.
//!
//! The engine emits `debug` spans around computations and `warn` events for
//! rejected operations. Key material never reaches a log line: wherever key
//! bytes would be mentioned, [`sanitize_data`] renders only their length.
//! No digest of the bytes is ever printed, since an unkeyed hash of a key
//! lets a log reader test guesses offline.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keyed_hash::logging::{init_tracing, sanitize_data};
//!
//! // Sets the global subscriber; call once per process.
//! init_tracing().expect("Failed to init tracing");
//!
//! let key = b"sensitive_key_material";
//! tracing::info!("key assigned: {}", sanitize_data(key));
//! ```

use std::fmt;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset. Covers the engine and the KAT
/// tooling built on it.
pub const DEFAULT_FILTER: &str = "keyed_hash=info,keyed_hash_validation=info";

/// Install a compact fmt subscriber filtered by `RUST_LOG`.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .try_init()?;

    info!("keyed-hash logging initialized");
    Ok(())
}

/// Wrap `data` so that displaying it reveals nothing but its length.
#[must_use]
pub fn sanitize_data(data: &[u8]) -> SanitizedData<'_> {
    SanitizedData(data)
}

/// Display adapter returned by [`sanitize_data`].
pub struct SanitizedData<'a>(&'a [u8]);

impl fmt::Display for SanitizedData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} bytes]", self.0.len())
    }
}
