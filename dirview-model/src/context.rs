use std::fmt;
use std::sync::Arc;

use dirview_crypto::PasswordScheme;
use dirview_schema::SchemaResolver;

use crate::{AttributeRegistry, ModelConfig, ModelResult};

/// Read-only collaborators an [`Entry`](crate::Entry) consults while
/// materializing: the type registry, the schema, and display settings.
///
/// Cheap to clone; every entry of a request shares one context.
#[derive(Clone)]
pub struct EntryContext {
    registry: Arc<AttributeRegistry>,
    schema: Arc<dyn SchemaResolver>,
    display_order: Arc<[String]>,
    password_scheme: PasswordScheme,
}

impl EntryContext {
    /// Built-in type rules, no display order, `{SSHA}` for new passwords.
    pub fn new(schema: Arc<dyn SchemaResolver>) -> Self {
        Self {
            registry: Arc::new(AttributeRegistry::builtin()),
            schema,
            display_order: Arc::from(Vec::new()),
            password_scheme: PasswordScheme::Ssha,
        }
    }

    /// Builds a context from configuration. Fails on invalid type patterns
    /// or an unknown password scheme.
    pub fn from_config(config: &ModelConfig, schema: Arc<dyn SchemaResolver>) -> ModelResult<Self> {
        let registry = AttributeRegistry::from_rules(&config.attribute_types)?;
        let password_scheme = config.default_password_scheme.parse::<PasswordScheme>()?;
        Ok(Self::new(schema)
            .with_registry(registry)
            .with_display_order(config.attr_display_order.iter().map(String::as_str))
            .with_password_scheme(password_scheme))
    }

    #[must_use]
    pub fn with_registry(mut self, registry: AttributeRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Sets the display order; names are case-folded.
    #[must_use]
    pub fn with_display_order<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let order: Vec<String> = names.into_iter().map(str::to_lowercase).collect();
        self.display_order = Arc::from(order);
        self
    }

    #[must_use]
    pub fn with_password_scheme(mut self, scheme: PasswordScheme) -> Self {
        self.password_scheme = scheme;
        self
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    pub fn schema(&self) -> &dyn SchemaResolver {
        self.schema.as_ref()
    }

    /// Lower-cased display order.
    pub fn display_order(&self) -> &[String] {
        &self.display_order
    }

    pub fn password_scheme(&self) -> PasswordScheme {
        self.password_scheme
    }
}

impl fmt::Debug for EntryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryContext")
            .field("display_order", &self.display_order)
            .field("password_scheme", &self.password_scheme)
            .finish_non_exhaustive()
    }
}
