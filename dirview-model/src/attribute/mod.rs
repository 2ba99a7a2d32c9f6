//! Typed attributes.

mod kind;
pub(crate) mod password;
mod render;

pub use kind::{AttributeKind, ParseAttributeKindError};
pub use render::Rendered;

use std::collections::{BTreeMap, BTreeSet};

use dirview_types::AttributeValue;

use crate::{ModelError, ModelResult};

/// One logical attribute of an entry.
///
/// Language-tagged values (`description;lang-en`) live under the same
/// attribute in [`lang_values`](Self::lang_values), keyed by tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    name_lc: String,
    kind: AttributeKind,
    values: Vec<AttributeValue>,
    lang_values: BTreeMap<String, Vec<AttributeValue>>,
    original_values: Option<Vec<AttributeValue>>,
    original_lang_values: BTreeMap<String, Vec<AttributeValue>>,
    is_rdn: bool,
    is_internal: bool,
    required_by: BTreeSet<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeKind, values: Vec<AttributeValue>) -> Self {
        let name = name.into();
        Self {
            name_lc: name.to_lowercase(),
            name,
            kind,
            values,
            lang_values: BTreeMap::new(),
            original_values: None,
            original_lang_values: BTreeMap::new(),
            is_rdn: false,
            is_internal: kind.is_internal(),
            required_by: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased name, the key attributes are stored and ordered under.
    pub fn name_lc(&self) -> &str {
        &self.name_lc
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn values(&self) -> &[AttributeValue] {
        &self.values
    }

    pub fn set_values(&mut self, values: Vec<AttributeValue>) {
        self.values = values;
    }

    /// Values as text. Binary values that are not valid UTF-8 are an
    /// [`ModelError::EncodingMismatch`] for every kind but
    /// [`AttributeKind::Binary`], which has no text form at all.
    pub fn text_values(&self) -> ModelResult<Vec<String>> {
        self.values.iter().map(|v| self.text_of(v)).collect()
    }

    pub(crate) fn text_of(&self, value: &AttributeValue) -> ModelResult<String> {
        let mismatch = || ModelError::EncodingMismatch {
            attribute: self.name.clone(),
            kind: self.kind,
        };
        if self.kind.is_binary() {
            return Err(mismatch());
        }
        match value {
            AttributeValue::Text(s) => Ok(s.clone()),
            AttributeValue::Binary(b) => String::from_utf8(b.clone()).map_err(|_| mismatch()),
        }
    }

    pub fn lang_values(&self) -> &BTreeMap<String, Vec<AttributeValue>> {
        &self.lang_values
    }

    /// Values filed under one tag key.
    pub fn lang_tag(&self, tag: &str) -> Option<&[AttributeValue]> {
        self.lang_values.get(tag).map(Vec::as_slice)
    }

    /// Files `values` under `tag`, replacing anything already there.
    pub fn set_lang_tag(&mut self, tag: impl Into<String>, values: Vec<AttributeValue>) {
        self.lang_values.insert(tag.into(), values);
    }

    pub fn original_values(&self) -> Option<&[AttributeValue]> {
        self.original_values.as_deref()
    }

    /// Records the values the directory held at load time.
    pub fn set_original_values(&mut self, values: Vec<AttributeValue>) {
        self.original_values = Some(values);
    }

    pub fn original_lang_values(&self) -> &BTreeMap<String, Vec<AttributeValue>> {
        &self.original_lang_values
    }

    pub fn set_original_lang_tag(&mut self, tag: impl Into<String>, values: Vec<AttributeValue>) {
        self.original_lang_values.insert(tag.into(), values);
    }

    pub fn is_rdn(&self) -> bool {
        self.is_rdn
    }

    /// Marks this attribute as naming the entry.
    pub fn set_rdn(&mut self) {
        self.is_rdn = true;
    }

    pub fn is_internal(&self) -> bool {
        self.is_internal
    }

    /// Marks this attribute as server-maintained (e.g. per the schema).
    pub fn set_internal(&mut self) {
        self.is_internal = true;
    }

    /// Records object classes that mandate this attribute. Repeated calls
    /// accumulate.
    pub fn required_by<I, S>(&mut self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_by.extend(classes.into_iter().map(Into::into));
    }

    /// Object classes that mandate this attribute.
    pub fn required_by_classes(&self) -> &BTreeSet<String> {
        &self.required_by
    }

    pub fn is_required(&self) -> bool {
        !self.required_by.is_empty()
    }

    /// Whether the current values differ from the load-time values under
    /// this attribute's kind.
    ///
    /// Without recorded original values the attribute is new, and dirty as
    /// soon as it holds anything.
    pub fn is_dirty(&self) -> bool {
        let original = self.original_values.as_deref().unwrap_or(&[]);
        if self.kind.values_differ(original, &self.values) {
            return true;
        }

        let tags: BTreeSet<&String> = self
            .lang_values
            .keys()
            .chain(self.original_lang_values.keys())
            .collect();
        tags.into_iter().any(|tag| {
            let before = self.original_lang_values.get(tag).map_or(&[][..], Vec::as_slice);
            let after = self.lang_values.get(tag).map_or(&[][..], Vec::as_slice);
            self.kind.values_differ(before, after)
        })
    }
}
