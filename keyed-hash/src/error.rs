//! Error types for keyed-hash.

/// Result type alias for keyed-hash operations.
pub type Result<T> = std::result::Result<T, HmacError>;

/// Errors that can occur while configuring or driving an HMAC engine.
///
/// Every variant reports caller misuse or a failed collaborator. None of
/// them are transient, so none are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HmacError {
    /// The key was absent, too short for the configured policy, or never set.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The operation is not valid in the transform's current state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The declared hash name does not describe the wired digest binding.
    #[error("Hash name mismatch: declared {declared}, engine is bound to {bound}")]
    BindingMismatch {
        /// Name most recently declared through `rebind`
        declared: String,
        /// Canonical name of the binding the engine was built with
        bound: &'static str,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A truncated tag is shorter than the verification policy allows.
    #[error("Invalid tag length: {actual} bytes (minimum {minimum} bytes)")]
    TagLength {
        /// Length of the supplied tag in bytes
        actual: usize,
        /// Shortest tag accepted for this digest and configuration
        minimum: usize,
    },

    /// Reading from the message source failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for HmacError {
    fn from(err: std::io::Error) -> Self {
        HmacError::Io(err.to_string())
    }
}
