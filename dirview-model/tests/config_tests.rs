mod common;

use std::sync::Arc;

use dirview_crypto::PasswordScheme;
use dirview_model::{AttributeKind, EntryContext, ModelConfig, ModelError, TypeRule};
use dirview_schema::StaticSchema;
use pretty_assertions::assert_eq;

const TOML: &str = r#"
attr_display_order = ["cn", "SN", "mail"]
default_password_scheme = "ssha512"

[[attribute_types]]
pattern = "x-portrait"
kind = "binary"

[[attribute_types]]
pattern = "re:x-.*-enabled"
kind = "boolean"
"#;

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn defaults() {
    let config = ModelConfig::default();
    assert!(config.attr_display_order.is_empty());
    assert!(config.attribute_types.is_empty());
    assert_eq!(config.default_password_scheme, "SSHA");
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(ModelConfig::from_toml_str("").unwrap(), ModelConfig::default());
}

#[test]
fn parses_toml() {
    let config = ModelConfig::from_toml_str(TOML).unwrap();
    assert_eq!(config.attr_display_order, vec!["cn", "SN", "mail"]);
    assert_eq!(
        config.attribute_types,
        vec![
            TypeRule::exact("x-portrait", AttributeKind::Binary),
            TypeRule::regex("x-.*-enabled", AttributeKind::Boolean),
        ]
    );
    assert_eq!(config.default_password_scheme, "ssha512");
}

#[test]
fn parses_json() {
    let json = r#"{
        "attr_display_order": ["uid"],
        "attribute_types": [{ "pattern": "manager", "kind": "dn_reference" }]
    }"#;
    let config = ModelConfig::from_json_str(json).unwrap();
    assert_eq!(config.attr_display_order, vec!["uid"]);
    assert_eq!(config.attribute_types[0].kind, AttributeKind::DnReference);
    assert_eq!(config.default_password_scheme, "SSHA");
}

#[test]
fn unknown_kind_is_a_config_error() {
    let toml = r#"
[[attribute_types]]
pattern = "x"
kind = "colour"
"#;
    assert!(matches!(ModelConfig::from_toml_str(toml), Err(ModelError::Config(_))));
}

// ── Files ────────────────────────────────────────────────────────

#[test]
fn load_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dirview.toml");
    std::fs::write(&path, TOML).unwrap();

    let config = ModelConfig::load_from(&path).unwrap();
    assert_eq!(config.attr_display_order.len(), 3);
}

#[test]
fn load_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dirview.json");
    std::fs::write(&path, r#"{"default_password_scheme": "SHA256"}"#).unwrap();

    let config = ModelConfig::load_from(&path).unwrap();
    assert_eq!(config.default_password_scheme, "SHA256");
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ModelConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ModelError::Io(_)));
}

#[test]
fn load_or_default_tolerates_missing_and_broken_files() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.toml");
    assert_eq!(ModelConfig::load_or_default(&missing), ModelConfig::default());

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "attr_display_order = [").unwrap();
    assert_eq!(ModelConfig::load_or_default(&broken), ModelConfig::default());
}

// ── Context from config ──────────────────────────────────────────

#[test]
fn context_from_config() {
    let config = ModelConfig::from_toml_str(TOML).unwrap();
    let ctx = EntryContext::from_config(&config, Arc::new(StaticSchema::core())).unwrap();

    assert_eq!(ctx.display_order(), &["cn", "sn", "mail"]);
    assert_eq!(ctx.password_scheme(), PasswordScheme::Ssha512);
    assert_eq!(ctx.registry().kind_for("x-portrait"), AttributeKind::Binary);
    assert_eq!(ctx.registry().kind_for("x-vpn-enabled"), AttributeKind::Boolean);
    assert_eq!(ctx.registry().kind_for("userPassword"), AttributeKind::Password);
}

#[test]
fn context_rejects_unknown_password_scheme() {
    let config = ModelConfig {
        default_password_scheme: "ROT13".into(),
        ..ModelConfig::default()
    };
    let err = EntryContext::from_config(&config, Arc::new(StaticSchema::core())).unwrap_err();
    assert!(matches!(err, ModelError::Crypto(_)));
}

#[test]
fn context_rejects_invalid_pattern() {
    let config = ModelConfig {
        attribute_types: vec![TypeRule::regex("(", AttributeKind::Text)],
        ..ModelConfig::default()
    };
    let err = EntryContext::from_config(&config, Arc::new(StaticSchema::core())).unwrap_err();
    assert!(matches!(err, ModelError::InvalidPattern { .. }));
}
