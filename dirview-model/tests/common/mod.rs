#![allow(dead_code)]

use std::sync::{Arc, Once};

use dirview_model::{Entry, EntryContext};
use dirview_schema::{ObjectClassDef, SchemaError, SchemaResolver, SchemaResult, StaticSchema};
use dirview_types::{AttributeValue, RawAttributes};

static TRACING: Once = Once::new();

/// Routes tracing output through the test harness (`RUST_LOG=debug cargo test`).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn text(values: &[&str]) -> Vec<AttributeValue> {
    values.iter().map(|v| AttributeValue::from(*v)).collect()
}

pub fn ctx() -> EntryContext {
    init_tracing();
    EntryContext::new(Arc::new(StaticSchema::core()))
}

pub fn ctx_with_order(order: &[&str]) -> EntryContext {
    ctx().with_display_order(order.iter().copied())
}

pub fn person_raw() -> RawAttributes {
    RawAttributes::new()
        .with("objectClass", ["top", "person", "organizationalPerson", "inetOrgPerson"])
        .with("cn", ["Alice Example"])
        .with("sn", ["Example"])
        .with("uid", ["alice"])
        .with("mail", ["alice@example.com"])
        .with("createTimestamp", ["20240131120000Z"])
        .with("entryUUID", ["5f3b6a0e-1c1e-4c9b-9b7e-0d5c8f6c1a11"])
}

pub fn person() -> Entry {
    Entry::load("uid=alice,ou=People,dc=example,dc=com", person_raw(), ctx()).unwrap()
}

/// Schema permitting exactly `{cn, sn, mail}` on `small`.
pub fn small_schema() -> StaticSchema {
    StaticSchema::new().with_object_class(
        ObjectClassDef::structural("small")
            .with_must(["cn", "sn"])
            .with_may(["mail"]),
    )
}

/// A schema store that is down.
pub struct UnreachableSchema;

impl SchemaResolver for UnreachableSchema {
    fn object_class(&self, _name: &str) -> SchemaResult<Option<ObjectClassDef>> {
        Err(SchemaError::Lookup("schema store unreachable".into()))
    }
}
