//! Core type definitions for dirview.
//!
//! This crate defines the transport-facing value types every other dirview
//! crate builds on:
//! - [`Dn`] / [`Rdn`] — distinguished names, compared case-insensitively per component
//! - [`AttributeValue`] — a single text or binary attribute value
//! - [`RawAttributes`] — the ordered, untyped attribute snapshot returned by a search
//!
//! Typed attributes, schema handling and dirty tracking live in `dirview-model`.

mod dn;
mod raw;
mod value;

pub use dn::{Ava, Dn, Rdn};
pub use raw::RawAttributes;
pub use value::AttributeValue;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid DN '{dn}': {reason}")]
    InvalidDn { dn: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
