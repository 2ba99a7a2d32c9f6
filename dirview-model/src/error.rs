use thiserror::Error;

use crate::AttributeKind;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors surfaced by the entry model.
///
/// Materialization itself never fails: unknown attribute types fall back to
/// text and schema failures degrade to "not required". These errors come
/// from the explicit schema queries, configuration, and value rendering.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Schema(#[from] dirview_schema::SchemaError),

    #[error("invalid attribute type pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A value that is not valid UTF-8 reached a text-only variant.
    #[error("attribute '{attribute}' holds binary data but is a {kind} attribute")]
    EncodingMismatch {
        attribute: String,
        kind: AttributeKind,
    },

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Crypto(#[from] dirview_crypto::CryptoError),

    #[error(transparent)]
    Types(#[from] dirview_types::Error),
}
