//! Directory entry model for dirview.
//!
//! Turns the flat, tag-suffixed attribute snapshots a directory search
//! returns into typed, schema-aware, change-tracked attributes:
//! - [`Entry`] — one DN with its current and load-time snapshots
//! - [`Attribute`] — one logical attribute, language-tagged values included
//! - [`AttributeKind`] — the variant deciding comparison and presentation
//! - [`AttributeRegistry`] — name → kind rules, with a text fallback
//! - [`EntryContext`] — the registry, schema and display settings an entry reads
//!
//! Schema lookups go through [`dirview_schema::SchemaResolver`]; nothing in
//! this crate talks to a server.

mod attribute;
mod config;
mod context;
mod description;
mod entry;
mod error;
mod registry;

pub use attribute::{Attribute, AttributeKind, ParseAttributeKindError, Rendered};
pub use config::{ModelConfig, TypeRule};
pub use context::EntryContext;
pub use description::AttributeDescription;
pub use entry::{
    display_order_cmp, sort_attributes, AttributeChange, ChangeOp, Entry, Icon,
};
pub use error::{ModelError, ModelResult};
pub use registry::{AttributeRegistry, PATTERN_PREFIX};
