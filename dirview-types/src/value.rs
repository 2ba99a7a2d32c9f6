use serde::{Deserialize, Serialize};
use std::fmt;

/// A single LDAP attribute value.
///
/// Directory servers hand back either UTF-8 text or opaque bytes (photos,
/// certificates, SIDs). Which one a value is depends on how the transport
/// decoded it, not on the attribute's schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Binary(Vec<u8>),
}

impl AttributeValue {
    /// Returns the text, or `None` for binary values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Binary(_) => None,
        }
    }

    /// Returns the raw bytes of the value, whichever form it is in.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }

    /// Text view of the value, replacing invalid UTF-8 for binary values.
    pub fn to_text_lossy(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Binary(b) => String::from_utf8_lossy(b).into_owned(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Binary(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(b)
    }
}

impl From<&[u8]> for AttributeValue {
    fn from(b: &[u8]) -> Self {
        Self::Binary(b.to_vec())
    }
}
