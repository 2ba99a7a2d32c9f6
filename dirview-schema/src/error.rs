use thiserror::Error;

/// Result type for schema lookups.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by a [`SchemaResolver`](crate::SchemaResolver).
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The backing schema store could not answer.
    #[error("schema lookup failed: {0}")]
    Lookup(String),

    /// An object class lists itself among its own superiors.
    #[error("object class inheritance cycle through '{0}'")]
    Cycle(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
