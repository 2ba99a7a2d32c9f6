//! Attribute descriptions: `name;option;option`.
//!
//! Directory servers return language-tagged values under their own keys
//! (`description;lang-en`). The base name before the first `;` identifies
//! the logical attribute; the rest is the tag key the values are filed under.

use regex_lite::Regex;
use std::sync::LazyLock;
use tracing::debug;

static TAGGED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9-]*)((?:;[A-Za-z0-9-]+)+)$")
        .expect("attribute description pattern is valid")
});

/// A raw attribute key split into base name and options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescription {
    base: String,
    options: Vec<String>,
}

impl AttributeDescription {
    /// Splits a raw key.
    ///
    /// Keys without `;` are plain names. Keys with `;` that do not fit the
    /// `name;opt[;opt…]` grammar (trailing `;`, empty option, stray
    /// characters) are kept whole as a literal name with no options.
    pub fn parse(raw: &str) -> Self {
        if !raw.contains(';') {
            return Self::literal(raw);
        }

        let Some(caps) = TAGGED.captures(raw) else {
            debug!(key = raw, "malformed attribute description, using it verbatim");
            return Self::literal(raw);
        };

        let base = caps.get(1).map_or("", |m| m.as_str());
        let options = caps
            .get(2)
            .map_or("", |m| m.as_str())
            .split(';')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            base: base.to_string(),
            options,
        }
    }

    fn literal(raw: &str) -> Self {
        Self {
            base: raw.to_string(),
            options: Vec::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Options joined back together: `lang-en;lang-en-us`. Empty without options.
    pub fn tag_key(&self) -> String {
        self.options.join(";")
    }

    /// The `lang-*` options only.
    pub fn language_tags(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .map(String::as_str)
            .filter(|o| o.len() > 5 && o[..5].eq_ignore_ascii_case("lang-"))
    }
}
