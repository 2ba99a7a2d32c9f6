use serde::Serialize;

use dirview_types::AttributeValue;

use crate::attribute::password;
use crate::{Attribute, AttributeKind, EntryContext};

/// Modification type, as in an LDAP modify request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Add,
    Replace,
    Delete,
}

/// One modification to write back to the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeChange {
    pub op: ChangeOp,
    /// Attribute description, including any tag suffix.
    pub attribute: String,
    /// New values; empty for deletes.
    pub values: Vec<AttributeValue>,
}

impl AttributeChange {
    fn delete(attribute: String) -> Self {
        Self {
            op: ChangeOp::Delete,
            attribute,
            values: Vec::new(),
        }
    }
}

/// Modifications for one materialized attribute: its untagged values and
/// each tag key, compared under the attribute's kind.
pub(crate) fn attribute_changes(attr: &Attribute, ctx: &EntryContext) -> Vec<AttributeChange> {
    let mut out = Vec::new();

    if let Some(change) = diff(
        attr,
        ctx,
        attr.name().to_string(),
        attr.original_values(),
        attr.values(),
    ) {
        out.push(change);
    }

    let mut tags: Vec<&String> = attr
        .lang_values()
        .keys()
        .chain(attr.original_lang_values().keys())
        .collect();
    tags.sort();
    tags.dedup();

    for tag in tags {
        let before = attr.original_lang_values().get(tag).map(Vec::as_slice);
        let after = attr.lang_values().get(tag).map_or(&[][..], Vec::as_slice);
        if let Some(change) = diff(attr, ctx, format!("{};{}", attr.name(), tag), before, after) {
            out.push(change);
        }
    }
    out
}

pub(crate) fn removal(attribute: &str) -> AttributeChange {
    AttributeChange::delete(attribute.to_string())
}

fn diff(
    attr: &Attribute,
    ctx: &EntryContext,
    description: String,
    before: Option<&[AttributeValue]>,
    after: &[AttributeValue],
) -> Option<AttributeChange> {
    let existed = before.is_some_and(|v| !v.is_empty());
    if !attr.kind().values_differ(before.unwrap_or(&[]), after) {
        return None;
    }

    if after.is_empty() {
        return existed.then(|| AttributeChange::delete(description));
    }

    let values = if attr.kind() == AttributeKind::Password {
        let scheme = before
            .and_then(password::stored_scheme)
            .unwrap_or_else(|| ctx.password_scheme());
        after
            .iter()
            .map(|v| password::prepare_for_storage(v, scheme))
            .collect()
    } else {
        after.to_vec()
    };

    Some(AttributeChange {
        op: if existed { ChangeOp::Replace } else { ChangeOp::Add },
        attribute: description,
        values,
    })
}
