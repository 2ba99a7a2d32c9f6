//! Attribute type registry.
//!
//! Maps attribute names to the [`AttributeKind`] that understands them.
//! Exact names are checked first, then patterns in registration order, then
//! the fallback. Every name resolves.

use regex_lite::{Regex, RegexBuilder};
use std::collections::HashMap;
use tracing::debug;

use dirview_types::AttributeValue;

use crate::config::TypeRule;
use crate::{Attribute, AttributeKind, ModelError, ModelResult};

/// Built-in name → kind rules for the common schema.
///
/// Only RFC 2307 `{SCHEME}` attributes are passwords. Samba's
/// `sambaNTPassword`/`sambaLMPassword` hold bare hex digests and stay text.
const BUILTIN: &[(&str, AttributeKind)] = &[
    ("userpassword", AttributeKind::Password),
    ("jpegphoto", AttributeKind::Binary),
    ("photo", AttributeKind::Binary),
    ("audio", AttributeKind::Binary),
    ("usercertificate", AttributeKind::Binary),
    ("cacertificate", AttributeKind::Binary),
    ("certificaterevocationlist", AttributeKind::Binary),
    ("authorityrevocationlist", AttributeKind::Binary),
    ("crosscertificatepair", AttributeKind::Binary),
    ("usersmimecertificate", AttributeKind::Binary),
    ("userpkcs12", AttributeKind::Binary),
    ("objectguid", AttributeKind::Binary),
    ("objectsid", AttributeKind::Binary),
    ("member", AttributeKind::DnReference),
    ("uniquemember", AttributeKind::DnReference),
    ("owner", AttributeKind::DnReference),
    ("manager", AttributeKind::DnReference),
    ("secretary", AttributeKind::DnReference),
    ("seealso", AttributeKind::DnReference),
    ("roleoccupant", AttributeKind::DnReference),
    ("aliasedobjectname", AttributeKind::DnReference),
    ("memberof", AttributeKind::DnReference),
    ("objectclass", AttributeKind::ObjectClass),
    ("createtimestamp", AttributeKind::Timestamp),
    ("modifytimestamp", AttributeKind::Timestamp),
    ("creatorsname", AttributeKind::Internal),
    ("modifiersname", AttributeKind::Internal),
    ("entrycsn", AttributeKind::Internal),
    ("entrydn", AttributeKind::Internal),
    ("entryuuid", AttributeKind::Internal),
    ("hassubordinates", AttributeKind::Internal),
    ("numsubordinates", AttributeKind::Internal),
    ("structuralobjectclass", AttributeKind::Internal),
    ("subschemasubentry", AttributeKind::Internal),
    ("contextcsn", AttributeKind::Internal),
    ("pwdchangedtime", AttributeKind::Internal),
    ("pwdhistory", AttributeKind::Internal),
];

/// Prefix marking a configured pattern as a regular expression.
pub const PATTERN_PREFIX: &str = "re:";

/// Resolves attribute names to kinds and builds [`Attribute`]s.
#[derive(Debug, Clone)]
pub struct AttributeRegistry {
    exact: HashMap<String, AttributeKind>,
    patterns: Vec<(Regex, AttributeKind)>,
    fallback: AttributeKind,
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AttributeRegistry {
    /// A registry with no rules: everything is [`AttributeKind::Text`].
    pub fn empty() -> Self {
        Self {
            exact: HashMap::new(),
            patterns: Vec::new(),
            fallback: AttributeKind::Text,
        }
    }

    /// The built-in rules.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (name, kind) in BUILTIN {
            registry.register(name, *kind);
        }
        registry
    }

    /// Built-in rules overlaid with configured ones.
    pub fn from_rules(rules: &[TypeRule]) -> ModelResult<Self> {
        let mut registry = Self::builtin();
        for rule in rules {
            registry.add_rule(rule)?;
        }
        Ok(registry)
    }

    /// Adds one configured rule; `re:` patterns become regex rules.
    pub fn add_rule(&mut self, rule: &TypeRule) -> ModelResult<()> {
        match rule.pattern.strip_prefix(PATTERN_PREFIX) {
            Some(pattern) => self.register_pattern(pattern, rule.kind),
            None => {
                self.register(&rule.pattern, rule.kind);
                Ok(())
            }
        }
    }

    /// Maps an exact attribute name (any case) to `kind`.
    pub fn register(&mut self, name: &str, kind: AttributeKind) {
        self.exact.insert(name.to_lowercase(), kind);
    }

    /// Maps every name matching `pattern` (case-insensitive, whole name) to `kind`.
    pub fn register_pattern(&mut self, pattern: &str, kind: AttributeKind) -> ModelResult<()> {
        let regex = RegexBuilder::new(&format!("^(?:{pattern})$"))
            .case_insensitive(true)
            .build()
            .map_err(|e| ModelError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        self.patterns.push((regex, kind));
        Ok(())
    }

    /// Kind used when nothing matches.
    #[must_use]
    pub fn with_fallback(mut self, kind: AttributeKind) -> Self {
        self.fallback = kind;
        self
    }

    /// Resolves the kind for an attribute name.
    pub fn kind_for(&self, name: &str) -> AttributeKind {
        let lc = name.to_lowercase();
        if let Some(kind) = self.exact.get(&lc) {
            return *kind;
        }
        if let Some((_, kind)) = self.patterns.iter().find(|(re, _)| re.is_match(&lc)) {
            return *kind;
        }
        debug!(attribute = name, kind = %self.fallback, "no type rule, using fallback");
        self.fallback
    }

    /// Builds an attribute of the resolved kind.
    pub fn create(&self, name: &str, values: Vec<AttributeValue>) -> Attribute {
        Attribute::new(name, self.kind_for(name), values)
    }
}
