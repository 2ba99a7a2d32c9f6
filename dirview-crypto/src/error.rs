//! Error types for password hashing.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while parsing or checking stored passwords.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The `{SCHEME}` prefix names a scheme this crate cannot compute.
    #[error("unsupported password scheme: {0}")]
    UnknownScheme(String),

    /// The hash body is not valid base64.
    #[error("invalid hash encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// The decoded hash is shorter than the scheme's digest.
    #[error("invalid hash length for {scheme}: expected at least {expected}, got {actual}")]
    InvalidHashLength {
        scheme: &'static str,
        expected: usize,
        actual: usize,
    },
}
