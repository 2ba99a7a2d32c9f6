use dirview_schema::{ObjectClassDef, SchemaError, SchemaResolver, SchemaResult, StaticSchema};
use pretty_assertions::assert_eq;

fn names(classes: &[ObjectClassDef]) -> Vec<&str> {
    classes.iter().map(ObjectClassDef::name).collect()
}

// ── Lineage ──────────────────────────────────────────────────────

#[test]
fn lineage_walks_superiors() {
    let schema = StaticSchema::core();
    let lineage = schema.lineage("inetOrgPerson").unwrap();
    assert_eq!(
        names(&lineage),
        vec!["inetOrgPerson", "organizationalPerson", "person", "top"]
    );
}

#[test]
fn lineage_of_unknown_class_is_empty() {
    let schema = StaticSchema::core();
    assert!(schema.lineage("nope").unwrap().is_empty());
}

#[test]
fn lineage_skips_unknown_superiors() {
    let schema = StaticSchema::new()
        .with_object_class(ObjectClassDef::structural("thing").with_superior("missing"));
    assert_eq!(names(&schema.lineage("thing").unwrap()), vec!["thing"]);
}

#[test]
fn lineage_visits_shared_superior_once() {
    let schema = StaticSchema::new()
        .with_object_class(ObjectClassDef::abstract_class("top"))
        .with_object_class(ObjectClassDef::structural("a").with_superior("top"))
        .with_object_class(
            ObjectClassDef::structural("b")
                .with_superior("a")
                .with_superior("top"),
        );
    let lineage = schema.lineage("b").unwrap();
    assert_eq!(lineage.len(), 3);
}

#[test]
fn lineage_detects_cycles() {
    let schema = StaticSchema::new()
        .with_object_class(ObjectClassDef::structural("a").with_superior("b"))
        .with_object_class(ObjectClassDef::structural("b").with_superior("a"));
    let err = schema.lineage("a").unwrap_err();
    assert!(matches!(err, SchemaError::Cycle(_)));
}

// ── Permitted / required ─────────────────────────────────────────

#[test]
fn permitted_attributes_include_inherited() {
    let schema = StaticSchema::core();
    let attrs = schema.permitted_attributes("organizationalPerson").unwrap();
    for expected in ["objectClass", "cn", "sn", "telephoneNumber", "title"] {
        assert!(attrs.iter().any(|a| a == expected), "missing {expected}");
    }
}

#[test]
fn permitted_attributes_dedup_ignoring_case() {
    let schema = StaticSchema::new().with_object_class(
        ObjectClassDef::structural("x")
            .with_must(["cn"])
            .with_may(["CN", "mail"]),
    );
    assert_eq!(schema.permitted_attributes("x").unwrap(), vec!["cn", "mail"]);
}

#[test]
fn required_attributes_only_must() {
    let schema = StaticSchema::core();
    let attrs = schema.required_attributes("person").unwrap();
    assert_eq!(attrs, vec!["sn", "cn", "objectClass"]);
}

// ── Custom resolvers ─────────────────────────────────────────────

struct FailingResolver;

impl SchemaResolver for FailingResolver {
    fn object_class(&self, _name: &str) -> SchemaResult<Option<ObjectClassDef>> {
        Err(SchemaError::Lookup("server unreachable".into()))
    }
}

#[test]
fn default_attribute_type_is_none() {
    assert!(FailingResolver.attribute_type("cn").unwrap().is_none());
}

#[test]
fn lookup_failures_propagate() {
    let err = FailingResolver.permitted_attributes("person").unwrap_err();
    assert!(format!("{err}").contains("server unreachable"));
}
