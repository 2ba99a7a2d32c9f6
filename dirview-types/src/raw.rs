//! Raw attribute snapshots as handed over by the directory transport.

use serde::{Deserialize, Serialize};

use crate::{AttributeValue, Result};

/// Ordered mapping from raw attribute key to values.
///
/// Keys are kept verbatim, including any `;option` suffixes
/// (`description;lang-en`). Insertion order is preserved because it is the
/// order materialization walks the snapshot in. Key lookups ignore case, as
/// LDAP attribute descriptions do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAttributes {
    entries: Vec<(String, Vec<AttributeValue>)>,
}

impl RawAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with<K, V>(mut self, key: K, values: impl IntoIterator<Item = V>) -> Self
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        self.insert(key, values.into_iter().map(Into::into).collect());
        self
    }

    /// Inserts or replaces the values stored under `key`.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<AttributeValue>) {
        let key = key.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1 = values,
            None => self.entries.push((key, values)),
        }
    }

    /// Removes `key`, returning its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<AttributeValue>> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    pub fn get(&self, key: &str) -> Option<&[AttributeValue]> {
        self.position(key).map(|i| self.entries[i].1.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// First value under `key` as text.
    pub fn first_text(&self, key: &str) -> Option<&str> {
        self.get(key)?.first()?.as_text()
    }

    /// All text values under `key`; binary values are skipped.
    pub fn texts(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .map(|values| values.iter().filter_map(AttributeValue::as_text).collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AttributeValue])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a snapshot from its JSON form: an array of `[key, [values]]` pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
    }
}

impl<K, V> FromIterator<(K, Vec<V>)> for RawAttributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        let mut raw = Self::new();
        for (key, values) in iter {
            raw.insert(key, values.into_iter().map(Into::into).collect());
        }
        raw
    }
}

impl<'a> IntoIterator for &'a RawAttributes {
    type Item = &'a (String, Vec<AttributeValue>);
    type IntoIter = std::slice::Iter<'a, (String, Vec<AttributeValue>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(feature = "ldap3")]
impl From<&ldap3::SearchEntry> for RawAttributes {
    /// `SearchEntry` keeps attributes in hash maps, so keys are sorted to
    /// give materialization a stable walk order. Binary attributes follow
    /// the text ones.
    fn from(entry: &ldap3::SearchEntry) -> Self {
        let mut text: Vec<_> = entry.attrs.iter().collect();
        text.sort_by_key(|(k, _)| k.to_lowercase());
        let mut binary: Vec<_> = entry.bin_attrs.iter().collect();
        binary.sort_by_key(|(k, _)| k.to_lowercase());

        let mut raw = Self::new();
        for (key, values) in text {
            raw.insert(
                key.clone(),
                values.iter().cloned().map(AttributeValue::Text).collect(),
            );
        }
        for (key, values) in binary {
            raw.insert(
                key.clone(),
                values.iter().cloned().map(AttributeValue::Binary).collect(),
            );
        }
        raw
    }
}
