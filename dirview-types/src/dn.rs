//! Distinguished names.
//!
//! A DN is kept in the form it was received in (for display and as a sort
//! key) alongside its parsed components. Equality and hashing use the
//! normalized components: attribute types and values compare
//! case-insensitively and whitespace around separators is ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::{Error, Result};

/// One `attribute=value` assertion inside an RDN.
#[derive(Debug, Clone)]
pub struct Ava {
    pub attribute: String,
    pub value: String,
}

impl Ava {
    fn normalized(&self) -> String {
        format!(
            "{}={}",
            self.attribute.to_lowercase(),
            self.value.to_lowercase()
        )
    }
}

/// Relative distinguished name: the leftmost naming component of a DN.
///
/// Multi-valued RDNs (`cn=a+uid=b`) carry more than one assertion.
#[derive(Debug, Clone)]
pub struct Rdn {
    avas: Vec<Ava>,
}

impl Rdn {
    /// Returns the attribute/value assertions of this RDN.
    pub fn avas(&self) -> &[Ava] {
        &self.avas
    }

    /// Whether `attribute` names (part of) this RDN, ignoring case.
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.avas
            .iter()
            .any(|ava| ava.attribute.eq_ignore_ascii_case(attribute))
    }

    fn normalized(&self) -> String {
        let mut parts: Vec<String> = self.avas.iter().map(Ava::normalized).collect();
        // Assertion order inside a multi-valued RDN is not significant.
        parts.sort();
        parts.join("+")
    }
}

impl PartialEq for Rdn {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Rdn {}

impl fmt::Display for Rdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .avas
            .iter()
            .map(|ava| format!("{}={}", ava.attribute, ava.value))
            .collect();
        write!(f, "{}", parts.join("+"))
    }
}

/// A distinguished name.
///
/// The empty DN is valid and names the root DSE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dn {
    raw: String,
    rdns: Vec<Rdn>,
}

impl Dn {
    /// Parses a DN string (RFC 4514 syntax, backslash escapes honoured).
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidDn {
            dn: s.to_string(),
            reason: reason.to_string(),
        };

        if s.trim().is_empty() {
            return Ok(Self::root());
        }

        let mut rdns = Vec::new();
        for component in split_unescaped(s, ',') {
            if component.trim().is_empty() {
                return Err(invalid("empty RDN component"));
            }

            let mut avas = Vec::new();
            for assertion in split_unescaped(component, '+') {
                let Some((attribute, value)) = split_once_unescaped(assertion, '=') else {
                    return Err(invalid("RDN component without '='"));
                };
                let attribute = attribute.trim();
                if attribute.is_empty() {
                    return Err(invalid("RDN component without an attribute type"));
                }
                avas.push(Ava {
                    attribute: attribute.to_string(),
                    value: value.trim().to_string(),
                });
            }
            rdns.push(Rdn { avas });
        }

        Ok(Self {
            raw: s.to_string(),
            rdns,
        })
    }

    /// The root DSE (empty DN).
    #[must_use]
    pub fn root() -> Self {
        Self {
            raw: String::new(),
            rdns: Vec::new(),
        }
    }

    /// Whether this is the empty DN.
    pub fn is_root(&self) -> bool {
        self.rdns.is_empty()
    }

    /// Returns the DN exactly as it was supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the components, leftmost (most specific) first.
    pub fn rdns(&self) -> &[Rdn] {
        &self.rdns
    }

    /// Returns the leftmost component.
    pub fn rdn(&self) -> Option<&Rdn> {
        self.rdns.first()
    }

    /// Whether the leading component is named by `attribute` (`attribute=...`).
    pub fn is_named_by(&self, attribute: &str) -> bool {
        self.rdn().is_some_and(|rdn| rdn.has_attribute(attribute))
    }

    /// Returns the parent DN, or `None` for the root DSE.
    pub fn parent(&self) -> Option<Dn> {
        if self.rdns.is_empty() {
            return None;
        }
        let rdns = self.rdns[1..].to_vec();
        let raw = rdns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Some(Self { raw, rdns })
    }

    /// Normalized key with the components reversed (root first), so that
    /// sorting by it groups children directly below their parents.
    pub fn hierarchical_key(&self) -> String {
        self.rdns
            .iter()
            .rev()
            .map(Rdn::normalized)
            .collect::<Vec<_>>()
            .join(",")
    }

    fn normalized(&self) -> Vec<String> {
        self.rdns.iter().map(Rdn::normalized).collect()
    }
}

impl PartialEq for Dn {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Dn {}

impl Hash for Dn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Dn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Dn {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Dn> for String {
    fn from(dn: Dn) -> Self {
        dn.raw
    }
}

/// Splits on `sep` where it is not preceded by a backslash escape.
fn split_unescaped(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&s[start..]);
    parts
}

fn split_once_unescaped(s: &str, sep: char) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            return Some((&s[..i], &s[i + c.len_utf8()..]));
        }
    }
    None
}
