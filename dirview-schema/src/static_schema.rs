//! In-memory schema.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::{AttributeTypeDef, ObjectClassDef, SchemaResolver, SchemaResult};

/// Serialized form: `{"object_classes": [...], "attribute_types": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SchemaFile {
    #[serde(default)]
    object_classes: Vec<ObjectClassDef>,
    #[serde(default)]
    attribute_types: Vec<AttributeTypeDef>,
}

/// A schema held entirely in memory, indexed by every lower-cased name.
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    object_classes: Vec<ObjectClassDef>,
    attribute_types: Vec<AttributeTypeDef>,
    class_index: HashMap<String, usize>,
    type_index: HashMap<String, usize>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a schema from its JSON form.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let file: SchemaFile = serde_json::from_str(json)?;
        let mut schema = Self::new();
        for class in file.object_classes {
            schema.add_object_class(class);
        }
        for attr in file.attribute_types {
            schema.add_attribute_type(attr);
        }
        debug!(
            object_classes = schema.object_classes.len(),
            attribute_types = schema.attribute_types.len(),
            "loaded static schema"
        );
        Ok(schema)
    }

    pub fn to_json(&self) -> SchemaResult<String> {
        let file = SchemaFile {
            object_classes: self.object_classes.clone(),
            attribute_types: self.attribute_types.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Adds or replaces an object class. A later definition sharing a name
    /// with an earlier one wins for that name.
    pub fn add_object_class(&mut self, class: ObjectClassDef) {
        let idx = self.object_classes.len();
        for name in &class.names {
            self.class_index.insert(name.to_lowercase(), idx);
        }
        self.object_classes.push(class);
    }

    pub fn add_attribute_type(&mut self, attr: AttributeTypeDef) {
        let idx = self.attribute_types.len();
        for name in &attr.names {
            self.type_index.insert(name.to_lowercase(), idx);
        }
        self.attribute_types.push(attr);
    }

    #[must_use]
    pub fn with_object_class(mut self, class: ObjectClassDef) -> Self {
        self.add_object_class(class);
        self
    }

    #[must_use]
    pub fn with_attribute_type(mut self, attr: AttributeTypeDef) -> Self {
        self.add_attribute_type(attr);
        self
    }

    /// The core classes of RFC 4519, RFC 2798 and RFC 2307 that directory
    /// browsers meet first, plus the common operational attributes.
    pub fn core() -> Self {
        Self::new()
            .with_object_class(ObjectClassDef::abstract_class("top").with_must(["objectClass"]))
            .with_object_class(
                ObjectClassDef::abstract_class("alias")
                    .with_superior("top")
                    .with_must(["aliasedObjectName"]),
            )
            .with_object_class(
                ObjectClassDef::structural("country")
                    .with_superior("top")
                    .with_must(["c"])
                    .with_may(["searchGuide", "description"]),
            )
            .with_object_class(
                ObjectClassDef::structural("organization")
                    .with_superior("top")
                    .with_must(["o"])
                    .with_may([
                        "userPassword",
                        "seeAlso",
                        "businessCategory",
                        "telephoneNumber",
                        "postalAddress",
                        "l",
                        "st",
                        "street",
                        "description",
                    ]),
            )
            .with_object_class(
                ObjectClassDef::structural("organizationalUnit")
                    .with_superior("top")
                    .with_must(["ou"])
                    .with_may([
                        "userPassword",
                        "seeAlso",
                        "businessCategory",
                        "telephoneNumber",
                        "postalAddress",
                        "l",
                        "st",
                        "street",
                        "description",
                    ]),
            )
            .with_object_class(
                ObjectClassDef::structural("person")
                    .with_superior("top")
                    .with_must(["sn", "cn"])
                    .with_may(["userPassword", "telephoneNumber", "seeAlso", "description"]),
            )
            .with_object_class(
                ObjectClassDef::structural("organizationalPerson")
                    .with_superior("person")
                    .with_may([
                        "title",
                        "ou",
                        "l",
                        "st",
                        "street",
                        "postalAddress",
                        "postalCode",
                        "facsimileTelephoneNumber",
                    ]),
            )
            .with_object_class(
                ObjectClassDef::structural("inetOrgPerson")
                    .with_superior("organizationalPerson")
                    .with_may([
                        "audio",
                        "businessCategory",
                        "carLicense",
                        "departmentNumber",
                        "displayName",
                        "employeeNumber",
                        "employeeType",
                        "givenName",
                        "homePhone",
                        "initials",
                        "jpegPhoto",
                        "mail",
                        "manager",
                        "mobile",
                        "o",
                        "pager",
                        "photo",
                        "preferredLanguage",
                        "secretary",
                        "uid",
                        "userCertificate",
                        "userSMIMECertificate",
                        "userPKCS12",
                    ]),
            )
            .with_object_class(
                ObjectClassDef::structural("groupOfNames")
                    .with_superior("top")
                    .with_must(["member", "cn"])
                    .with_may(["businessCategory", "seeAlso", "owner", "ou", "o", "description"]),
            )
            .with_object_class(
                ObjectClassDef::auxiliary("dcObject")
                    .with_superior("top")
                    .with_must(["dc"]),
            )
            .with_object_class(
                ObjectClassDef::auxiliary("posixAccount")
                    .with_superior("top")
                    .with_must(["cn", "uid", "uidNumber", "gidNumber", "homeDirectory"])
                    .with_may(["userPassword", "loginShell", "gecos", "description"]),
            )
            .with_object_class(
                ObjectClassDef::structural("posixGroup")
                    .with_superior("top")
                    .with_must(["cn", "gidNumber"])
                    .with_may(["userPassword", "memberUid", "description"]),
            )
            .with_attribute_type(AttributeTypeDef::operational("createTimestamp"))
            .with_attribute_type(AttributeTypeDef::operational("modifyTimestamp"))
            .with_attribute_type(AttributeTypeDef::operational("creatorsName"))
            .with_attribute_type(AttributeTypeDef::operational("modifiersName"))
            .with_attribute_type(AttributeTypeDef::operational("entryUUID"))
            .with_attribute_type(AttributeTypeDef::operational("entryCSN"))
            .with_attribute_type(AttributeTypeDef::operational("entryDN"))
            .with_attribute_type(AttributeTypeDef::operational("subschemaSubentry"))
            .with_attribute_type(AttributeTypeDef::operational("structuralObjectClass"))
            .with_attribute_type(AttributeTypeDef::operational("hasSubordinates"))
    }

    pub fn object_classes(&self) -> &[ObjectClassDef] {
        &self.object_classes
    }

    pub fn attribute_types(&self) -> &[AttributeTypeDef] {
        &self.attribute_types
    }
}

impl SchemaResolver for StaticSchema {
    fn object_class(&self, name: &str) -> SchemaResult<Option<ObjectClassDef>> {
        Ok(self
            .class_index
            .get(&name.to_lowercase())
            .map(|&i| self.object_classes[i].clone()))
    }

    fn attribute_type(&self, name: &str) -> SchemaResult<Option<AttributeTypeDef>> {
        Ok(self
            .type_index
            .get(&name.to_lowercase())
            .map(|&i| self.attribute_types[i].clone()))
    }
}
