use std::collections::HashSet;

use crate::{AttributeTypeDef, ObjectClassDef, SchemaError, SchemaResult};

/// Read-only access to a directory schema.
///
/// Implement this over whatever holds the schema: a cached subschema entry,
/// a file, or the in-memory [`StaticSchema`](crate::StaticSchema). Lookups
/// are synchronous and must not have side effects; a store that cannot
/// answer returns [`SchemaError::Lookup`].
///
/// Only [`object_class`](Self::object_class) is required. The provided
/// methods walk superior chains on top of it.
pub trait SchemaResolver: Send + Sync {
    /// Looks up an object class by any of its names, ignoring case.
    /// Unknown classes are `Ok(None)`.
    fn object_class(&self, name: &str) -> SchemaResult<Option<ObjectClassDef>>;

    /// Looks up an attribute type by any of its names, ignoring case.
    fn attribute_type(&self, name: &str) -> SchemaResult<Option<AttributeTypeDef>> {
        let _ = name;
        Ok(None)
    }

    /// The class followed by all of its superiors, each at most once.
    ///
    /// Superiors the schema does not know are skipped.
    fn lineage(&self, name: &str) -> SchemaResult<Vec<ObjectClassDef>> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut path = Vec::new();
        collect_lineage(self, name, &mut path, &mut seen, &mut out)?;
        Ok(out)
    }

    /// `MUST` and `MAY` attributes of a class, inherited ones included.
    fn permitted_attributes(&self, name: &str) -> SchemaResult<Vec<String>> {
        let mut attrs = Vec::new();
        for class in self.lineage(name)? {
            attrs.extend(class.attributes().map(String::from));
        }
        Ok(dedup_ignore_case(attrs))
    }

    /// `MUST` attributes of a class, inherited ones included.
    fn required_attributes(&self, name: &str) -> SchemaResult<Vec<String>> {
        let mut attrs = Vec::new();
        for class in self.lineage(name)? {
            attrs.extend(class.must.iter().cloned());
        }
        Ok(dedup_ignore_case(attrs))
    }
}

fn collect_lineage<R: SchemaResolver + ?Sized>(
    resolver: &R,
    name: &str,
    path: &mut Vec<String>,
    seen: &mut HashSet<String>,
    out: &mut Vec<ObjectClassDef>,
) -> SchemaResult<()> {
    let key = name.to_lowercase();
    if path.contains(&key) {
        return Err(SchemaError::Cycle(name.to_string()));
    }
    if !seen.insert(key.clone()) {
        return Ok(());
    }

    let Some(class) = resolver.object_class(name)? else {
        return Ok(());
    };

    path.push(key);
    for superior in &class.superior {
        collect_lineage(resolver, superior, path, seen, out)?;
    }
    path.pop();

    out.insert(0, class);
    Ok(())
}

/// Removes case-insensitive duplicates, keeping the first spelling.
fn dedup_ignore_case(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|n| seen.insert(n.to_lowercase()))
        .collect()
}
