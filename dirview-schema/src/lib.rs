//! Schema access for dirview.
//!
//! The entry model never owns schema data. It asks a [`SchemaResolver`]
//! which attributes an object class permits or requires, and whether an
//! attribute type is operational:
//! - [`ObjectClassDef`] — `SUP`, `MUST` and `MAY` of one object class
//! - [`AttributeTypeDef`] — usage and modification flags of one attribute type
//! - [`SchemaResolver`] — the adapter trait hosts implement over their schema store
//! - [`StaticSchema`] — an in-memory resolver, loadable from JSON

mod definition;
mod error;
mod resolver;
mod static_schema;

pub use definition::{AttributeTypeDef, AttributeUsage, ObjectClassDef, ObjectClassKind};
pub use error::{SchemaError, SchemaResult};
pub use resolver::SchemaResolver;
pub use static_schema::StaticSchema;
