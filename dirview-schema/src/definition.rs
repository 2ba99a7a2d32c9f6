use serde::{Deserialize, Serialize};

/// Kind of an object class (RFC 4512 §4.1.1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectClassKind {
    Abstract,
    #[default]
    Structural,
    Auxiliary,
}

/// An object class definition as published in the subschema entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectClassDef {
    /// Names, primary first (`["person"]`, or several for aliased classes).
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: ObjectClassKind,
    /// Superior classes (`SUP`).
    #[serde(default)]
    pub superior: Vec<String>,
    /// Mandatory attributes (`MUST`).
    #[serde(default)]
    pub must: Vec<String>,
    /// Optional attributes (`MAY`).
    #[serde(default)]
    pub may: Vec<String>,
}

impl ObjectClassDef {
    fn new(name: &str, kind: ObjectClassKind) -> Self {
        Self {
            names: vec![name.to_string()],
            oid: None,
            description: None,
            kind,
            superior: Vec::new(),
            must: Vec::new(),
            may: Vec::new(),
        }
    }

    /// Shorthand for a structural class.
    pub fn structural(name: &str) -> Self {
        Self::new(name, ObjectClassKind::Structural)
    }

    /// Shorthand for an auxiliary class.
    pub fn auxiliary(name: &str) -> Self {
        Self::new(name, ObjectClassKind::Auxiliary)
    }

    /// Shorthand for an abstract class.
    pub fn abstract_class(name: &str) -> Self {
        Self::new(name, ObjectClassKind::Abstract)
    }

    #[must_use]
    pub fn with_oid(mut self, oid: &str) -> Self {
        self.oid = Some(oid.to_string());
        self
    }

    #[must_use]
    pub fn with_alias(mut self, name: &str) -> Self {
        self.names.push(name.to_string());
        self
    }

    #[must_use]
    pub fn with_superior(mut self, name: &str) -> Self {
        self.superior.push(name.to_string());
        self
    }

    #[must_use]
    pub fn with_must<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.must.extend(names.into_iter().map(String::from));
        self
    }

    #[must_use]
    pub fn with_may<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.may.extend(names.into_iter().map(String::from));
        self
    }

    /// Primary name.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// Whether `name` is one of this class's names, ignoring case.
    pub fn is_named(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Declared `MUST` then `MAY` attributes, without inherited ones.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.must.iter().chain(self.may.iter()).map(String::as_str)
    }
}

/// How an attribute type is used (RFC 4512 §4.1.2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeUsage {
    #[default]
    UserApplications,
    DirectoryOperation,
    DistributedOperation,
    DsaOperation,
}

/// An attribute type definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeTypeDef {
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    #[serde(default)]
    pub single_value: bool,
    #[serde(default)]
    pub no_user_modification: bool,
    #[serde(default)]
    pub usage: AttributeUsage,
}

impl AttributeTypeDef {
    /// Shorthand for a user attribute.
    pub fn user(name: &str) -> Self {
        Self {
            names: vec![name.to_string()],
            oid: None,
            description: None,
            syntax: None,
            single_value: false,
            no_user_modification: false,
            usage: AttributeUsage::UserApplications,
        }
    }

    /// Shorthand for a server-maintained operational attribute.
    pub fn operational(name: &str) -> Self {
        Self {
            no_user_modification: true,
            usage: AttributeUsage::DirectoryOperation,
            ..Self::user(name)
        }
    }

    #[must_use]
    pub fn with_syntax(mut self, oid: &str) -> Self {
        self.syntax = Some(oid.to_string());
        self
    }

    #[must_use]
    pub fn single_valued(mut self) -> Self {
        self.single_value = true;
        self
    }

    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Operational attributes are maintained by the server and not edited
    /// by users.
    pub fn is_operational(&self) -> bool {
        self.no_user_modification || self.usage != AttributeUsage::UserApplications
    }
}
