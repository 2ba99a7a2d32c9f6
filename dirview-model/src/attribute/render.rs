use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

use dirview_types::AttributeValue;

use super::{password, Attribute, AttributeKind};
use crate::ModelResult;

/// Presentation data for one attribute, handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub name: String,
    pub kind: AttributeKind,
    /// Render as an edit control.
    pub edit: bool,
    /// Render an empty control for a value not yet present.
    pub blank: bool,
    pub values: Vec<String>,
    pub lang_values: BTreeMap<String, Vec<String>>,
    pub is_rdn: bool,
    pub is_required: bool,
    pub is_internal: bool,
    pub is_dirty: bool,
    /// Kind-specific extras: password schemes in use, binary sizes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

impl Attribute {
    /// Builds the presentation data for this attribute.
    ///
    /// Fails with [`ModelError::EncodingMismatch`](crate::ModelError::EncodingMismatch)
    /// when a text kind holds bytes that are not UTF-8.
    pub fn render(&self, edit: bool, blank: bool) -> ModelResult<Rendered> {
        let values = if blank {
            Vec::new()
        } else {
            self.display_values(&self.values)?
        };

        let mut lang_values = BTreeMap::new();
        for (tag, tagged) in &self.lang_values {
            lang_values.insert(tag.clone(), self.display_values(tagged)?);
        }

        Ok(Rendered {
            name: self.name.clone(),
            kind: self.kind,
            edit,
            blank,
            values,
            lang_values,
            is_rdn: self.is_rdn,
            is_required: self.is_required(),
            is_internal: self.is_internal,
            is_dirty: self.is_dirty(),
            hints: self.hints(),
        })
    }

    fn display_values(&self, values: &[AttributeValue]) -> ModelResult<Vec<String>> {
        values.iter().map(|v| self.display_value(v)).collect()
    }

    fn display_value(&self, value: &AttributeValue) -> ModelResult<String> {
        match self.kind {
            AttributeKind::Binary => Ok(BASE64.encode(value.as_bytes())),
            AttributeKind::Password => Ok(password::mask(value)),
            AttributeKind::Boolean => Ok(self.text_of(value)?.trim().to_uppercase()),
            AttributeKind::Timestamp => {
                let text = self.text_of(value)?;
                Ok(generalized_time_to_rfc3339(&text).unwrap_or(text))
            }
            _ => self.text_of(value),
        }
    }

    fn hints(&self) -> Vec<String> {
        match self.kind {
            AttributeKind::Password => self
                .values
                .iter()
                .filter_map(|v| v.as_text().and_then(dirview_crypto::scheme_tag))
                .map(str::to_uppercase)
                .collect(),
            AttributeKind::Binary => self
                .values
                .iter()
                .map(|v| format!("{} bytes", v.as_bytes().len()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Converts GeneralizedTime (`20240131120000Z`, with optional fraction or
/// numeric offset) to RFC 3339.
pub(crate) fn generalized_time_to_rfc3339(value: &str) -> Option<String> {
    if let Some(utc) = value.strip_suffix('Z') {
        for format in ["%Y%m%d%H%M%S%.f", "%Y%m%d%H%M%S", "%Y%m%d%H%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(utc, format) {
                return Some(naive.and_utc().to_rfc3339());
            }
        }
        return None;
    }
    for format in ["%Y%m%d%H%M%S%.f%z", "%Y%m%d%H%M%S%z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.to_rfc3339());
        }
    }
    None
}
