//! Attribute variants.
//!
//! Every attribute carries one [`AttributeKind`]. The kind decides how values
//! compare when checking for changes and how they are presented. Entry and
//! registry code never branch on the kind themselves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use dirview_types::{AttributeValue, Dn};

use super::password;

/// Semantic type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Generic text, compared exactly.
    Text,
    /// `userPassword` and friends; a plaintext equal to the stored hash is unchanged.
    Password,
    /// Opaque bytes (photos, certificates).
    Binary,
    /// LDAP Boolean syntax (`TRUE` / `FALSE`).
    Boolean,
    /// Values are DNs of other entries.
    DnReference,
    /// `objectClass` values, compared ignoring case.
    ObjectClass,
    /// Server-maintained GeneralizedTime values.
    Timestamp,
    /// Other server-maintained operational attributes.
    Internal,
}

impl AttributeKind {
    /// Every kind, in declaration order.
    #[must_use]
    pub fn all() -> &'static [AttributeKind] {
        &[
            Self::Text,
            Self::Password,
            Self::Binary,
            Self::Boolean,
            Self::DnReference,
            Self::ObjectClass,
            Self::Timestamp,
            Self::Internal,
        ]
    }

    /// The identifier used in configuration.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Binary => "binary",
            Self::Boolean => "boolean",
            Self::DnReference => "dn_reference",
            Self::ObjectClass => "object_class",
            Self::Timestamp => "timestamp",
            Self::Internal => "internal",
        }
    }

    /// Whether attributes of this kind are maintained by the server.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Timestamp | Self::Internal)
    }

    /// Whether values of this kind are opaque bytes rather than text.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary)
    }

    /// Whether `current` differs from `original` under this kind's notion of
    /// equality. Value order never matters.
    pub(crate) fn values_differ(
        &self,
        original: &[AttributeValue],
        current: &[AttributeValue],
    ) -> bool {
        if original.len() != current.len() {
            return true;
        }
        if *self == Self::Password {
            return !password::values_equivalent(original, current);
        }

        let mut a: Vec<Vec<u8>> = original.iter().map(|v| self.canonical(v)).collect();
        let mut b: Vec<Vec<u8>> = current.iter().map(|v| self.canonical(v)).collect();
        a.sort();
        b.sort();
        a != b
    }

    /// Comparison key for one value.
    fn canonical(&self, value: &AttributeValue) -> Vec<u8> {
        match self {
            Self::Boolean | Self::ObjectClass => match value.as_text() {
                Some(text) => text.trim().to_uppercase().into_bytes(),
                None => value.as_bytes().to_vec(),
            },
            Self::DnReference => match value.as_text().map(Dn::parse) {
                Some(Ok(dn)) => dn.hierarchical_key().into_bytes(),
                _ => value.as_bytes().to_vec(),
            },
            _ => value.as_bytes().to_vec(),
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeKind {
    type Err = ParseAttributeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ParseAttributeKindError(s.to_string()))
    }
}

/// Error parsing an attribute kind from string.
#[derive(Debug, Clone)]
pub struct ParseAttributeKindError(String);

impl fmt::Display for ParseAttributeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid attribute kind '{}'", self.0)
    }
}

impl std::error::Error for ParseAttributeKindError {}
