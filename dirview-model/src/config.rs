//! Model configuration, read from `dirview.toml` (or a JSON equivalent).
//!
//! ```toml
//! attr_display_order = ["cn", "sn", "givenName", "mail"]
//! default_password_scheme = "SSHA"
//!
//! [[attribute_types]]
//! pattern = "jpegPhoto"
//! kind = "binary"
//!
//! [[attribute_types]]
//! pattern = "re:x-.*-flag"
//! kind = "boolean"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::{AttributeKind, ModelResult};

/// One configured name → kind rule. Patterns prefixed with `re:` are
/// regular expressions over the whole name; anything else is an exact name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    pub pattern: String,
    pub kind: AttributeKind,
}

impl TypeRule {
    pub fn exact(name: &str, kind: AttributeKind) -> Self {
        Self {
            pattern: name.to_string(),
            kind,
        }
    }

    pub fn regex(pattern: &str, kind: AttributeKind) -> Self {
        Self {
            pattern: format!("{}{pattern}", crate::registry::PATTERN_PREFIX),
            kind,
        }
    }
}

/// Settings the entry model reads from the host's configuration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Attributes shown first, in this order. Compared ignoring case.
    #[serde(default)]
    pub attr_display_order: Vec<String>,
    /// Extra type rules, applied over the built-in ones.
    #[serde(default)]
    pub attribute_types: Vec<TypeRule>,
    /// Scheme for hashing new plaintext passwords when the stored value
    /// gives no hint.
    #[serde(default = "default_password_scheme")]
    pub default_password_scheme: String,
}

fn default_password_scheme() -> String {
    "SSHA".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            attr_display_order: Vec::new(),
            attribute_types: Vec::new(),
            default_password_scheme: default_password_scheme(),
        }
    }
}

impl ModelConfig {
    pub fn from_toml_str(contents: &str) -> ModelResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Loads a config file; `.json` files are JSON, anything else TOML.
    pub fn load_from(path: &Path) -> ModelResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };
        info!("Loaded model config from {:?}", path);
        Ok(config)
    }

    /// Like [`load_from`](Self::load_from), but a missing or broken file
    /// yields the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No model config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load model config {:?}: {}. Falling back to defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }
}
