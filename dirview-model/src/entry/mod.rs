//! Directory entries.
//!
//! An [`Entry`] wraps two raw snapshots of the same DN: the attributes as
//! loaded from the directory (`original`) and as currently edited
//! (`current`). Typed attributes are materialized from a snapshot on first
//! access and cached until the entry is mutated or explicitly invalidated.

mod changes;
mod icon;
mod sort;

pub use changes::{AttributeChange, ChangeOp};
pub use icon::Icon;
pub use sort::{display_order_cmp, sort_attributes};

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

use dirview_types::{AttributeValue, Dn, RawAttributes};

use crate::{Attribute, AttributeDescription, EntryContext, ModelResult};

/// Materialized view of one snapshot.
#[derive(Debug, Clone, PartialEq)]
struct Materialized {
    attributes: Vec<Attribute>,
    index: HashMap<String, usize>,
}

impl Materialized {
    fn get(&self, name: &str) -> Option<&Attribute> {
        let base = AttributeDescription::parse(name);
        self.index
            .get(&base.base().to_lowercase())
            .map(|&i| &self.attributes[i])
    }
}

/// Values of the original snapshot grouped by lower-cased base name.
#[derive(Default)]
struct OriginalValues {
    untagged: Option<Vec<AttributeValue>>,
    tagged: BTreeMap<String, Vec<AttributeValue>>,
}

/// A directory entry with typed, change-tracked attributes.
///
/// Not `Sync`: the materialized cache is filled through a shared reference.
/// Concurrent requests each build their own `Entry`.
#[derive(Debug, Clone)]
pub struct Entry {
    dn: Dn,
    current: RawAttributes,
    original: RawAttributes,
    ctx: EntryContext,
    materialized: OnceCell<Materialized>,
    original_materialized: OnceCell<Materialized>,
}

impl Entry {
    /// An entry as freshly loaded: the current values are the original ones.
    pub fn new(dn: Dn, attributes: RawAttributes, ctx: EntryContext) -> Self {
        Self::with_snapshots(dn, attributes.clone(), attributes, ctx)
    }

    /// An entry whose current values already differ from what was loaded.
    pub fn with_snapshots(
        dn: Dn,
        current: RawAttributes,
        original: RawAttributes,
        ctx: EntryContext,
    ) -> Self {
        Self {
            dn,
            current,
            original,
            ctx,
            materialized: OnceCell::new(),
            original_materialized: OnceCell::new(),
        }
    }

    /// Parses `dn` and builds a freshly loaded entry.
    pub fn load(dn: &str, attributes: RawAttributes, ctx: EntryContext) -> ModelResult<Self> {
        Ok(Self::new(Dn::parse(dn)?, attributes, ctx))
    }

    /// Builds a freshly loaded entry from an ldap3 search result.
    #[cfg(feature = "ldap3")]
    pub fn from_search_entry(entry: &ldap3::SearchEntry, ctx: EntryContext) -> ModelResult<Self> {
        Self::load(&entry.dn, RawAttributes::from(entry), ctx)
    }

    pub fn dn(&self) -> &Dn {
        &self.dn
    }

    /// Key to sort entries by: the DN as given. See [`Dn::hierarchical_key`]
    /// for parent-before-child ordering.
    pub fn sort_key(&self) -> &str {
        self.dn.as_str()
    }

    pub fn context(&self) -> &EntryContext {
        &self.ctx
    }

    /// The current raw snapshot.
    pub fn raw(&self) -> &RawAttributes {
        &self.current
    }

    /// The raw snapshot as loaded.
    pub fn original_raw(&self) -> &RawAttributes {
        &self.original
    }

    /// Current `objectClass` values.
    pub fn object_classes(&self) -> Vec<String> {
        self.current
            .texts("objectclass")
            .into_iter()
            .map(String::from)
            .collect()
    }

    // ── Materialized views ──────────────────────────────────────

    /// Typed attributes of the current snapshot, in display order.
    pub fn attributes(&self) -> &[Attribute] {
        &self
            .materialized
            .get_or_init(|| self.materialize(&self.current, true))
            .attributes
    }

    /// One attribute by name, ignoring case and any tag suffix.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes();
        self.materialized.get().and_then(|m| m.get(name))
    }

    /// Typed attributes of the original snapshot, in display order.
    pub fn original_attributes(&self) -> &[Attribute] {
        &self
            .original_materialized
            .get_or_init(|| self.materialize(&self.original, false))
            .attributes
    }

    pub fn original_attribute(&self, name: &str) -> Option<&Attribute> {
        self.original_attributes();
        self.original_materialized.get().and_then(|m| m.get(name))
    }

    /// Drops both materialized views; the next access rebuilds them.
    pub fn invalidate(&mut self) {
        debug!(dn = %self.dn, "invalidating materialized attributes");
        self.materialized.take();
        self.original_materialized.take();
    }

    // ── Mutation ────────────────────────────────────────────────

    /// Replaces the values under a raw key (tag suffix allowed).
    pub fn set_attribute(&mut self, key: &str, values: Vec<AttributeValue>) {
        self.current.insert(key, values);
        self.invalidate();
    }

    /// Removes an attribute with all of its tagged variants.
    pub fn remove_attribute(&mut self, name: &str) {
        let base = AttributeDescription::parse(name).base().to_lowercase();
        let keys: Vec<String> = self
            .current
            .keys()
            .filter(|k| AttributeDescription::parse(k).base().to_lowercase() == base)
            .map(String::from)
            .collect();
        for key in keys {
            self.current.remove(&key);
        }
        self.invalidate();
    }

    // ── Change tracking ─────────────────────────────────────────

    /// Whether the value under a raw key is unchanged since load.
    ///
    /// Raw equality settles it first; otherwise the attribute's own kind
    /// decides (a password typed back in plaintext is unchanged).
    pub fn original_is_equivalent(&self, key: &str) -> bool {
        let Some(original) = self.original.get(key) else {
            return false;
        };
        if self.current.get(key) == Some(original) {
            return true;
        }
        self.attribute(key).is_some_and(|attr| !attr.is_dirty())
    }

    /// Attributes whose values changed, in display order.
    pub fn dirty_attributes(&self) -> Vec<&Attribute> {
        self.attributes().iter().filter(|a| a.is_dirty()).collect()
    }

    /// Names of attributes that held values at load time but are gone now.
    pub fn removed_attributes(&self) -> Vec<String> {
        self.original_attributes()
            .iter()
            .filter(|a| !a.values().is_empty() || !a.lang_values().is_empty())
            .filter(|a| self.attribute(a.name()).is_none())
            .map(|a| a.name().to_string())
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty_attributes().is_empty() || !self.removed_attributes().is_empty()
    }

    /// Modifications that bring the directory from the original snapshot to
    /// the current one. Plaintext passwords are hashed under the stored
    /// value's scheme, or the context's default.
    pub fn changes(&self) -> Vec<AttributeChange> {
        let mut out: Vec<AttributeChange> = self
            .attributes()
            .iter()
            .flat_map(|attr| changes::attribute_changes(attr, &self.ctx))
            .collect();

        for name in self.removed_attributes() {
            let Some(attr) = self.original_attribute(&name) else {
                continue;
            };
            if !attr.values().is_empty() {
                out.push(changes::removal(attr.name()));
            }
            for tag in attr.lang_values().keys() {
                out.push(changes::removal(&format!("{};{}", attr.name(), tag)));
            }
        }
        out
    }

    // ── Classification ──────────────────────────────────────────

    /// Attributes users edit.
    pub fn visible_attributes(&self) -> Vec<&Attribute> {
        self.attributes().iter().filter(|a| !a.is_internal()).collect()
    }

    /// Server-maintained attributes.
    pub fn internal_attributes(&self) -> Vec<&Attribute> {
        self.attributes().iter().filter(|a| a.is_internal()).collect()
    }

    /// Attributes the entry's object classes permit, inherited ones
    /// included, without duplicates (ignoring case).
    pub fn available_attributes(&self) -> ModelResult<Vec<String>> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for class in self.object_classes() {
            for name in self.ctx.schema().permitted_attributes(&class)? {
                if seen.insert(name.to_lowercase()) {
                    out.push(name);
                }
            }
        }
        Ok(out)
    }

    /// Attributes the entry's object classes mandate.
    pub fn required_attributes(&self) -> ModelResult<Vec<String>> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for class in self.object_classes() {
            for name in self.ctx.schema().required_attributes(&class)? {
                if seen.insert(name.to_lowercase()) {
                    out.push(name);
                }
            }
        }
        Ok(out)
    }

    /// Permitted attributes the entry does not show yet.
    pub fn missing_attributes(&self) -> ModelResult<Vec<String>> {
        let visible: BTreeSet<&str> = self
            .visible_attributes()
            .into_iter()
            .map(Attribute::name_lc)
            .collect();
        Ok(self
            .available_attributes()?
            .into_iter()
            .filter(|name| !visible.contains(name.to_lowercase().as_str()))
            .collect())
    }

    /// The name attribute(s) of the leading RDN.
    pub fn rdn_attributes(&self) -> Vec<&Attribute> {
        self.attributes().iter().filter(|a| a.is_rdn()).collect()
    }

    pub fn icon(&self) -> Icon {
        Icon::for_object_classes(&self.object_classes(), self.current.first_text("c"))
    }

    // ── Materialization ─────────────────────────────────────────

    fn materialize(&self, raw: &RawAttributes, track_original: bool) -> Materialized {
        let required = self.required_by_attribute();
        let originals = if track_original {
            self.original_values()
        } else {
            HashMap::new()
        };

        let mut attributes: Vec<Attribute> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (key, values) in raw.iter() {
            let desc = AttributeDescription::parse(key);
            let lc = desc.base().to_lowercase();

            let idx = match index.get(&lc) {
                Some(&i) => {
                    if !desc.has_options() {
                        attributes[i].set_values(values.to_vec());
                    }
                    i
                }
                None => {
                    let initial = if desc.has_options() {
                        Vec::new()
                    } else {
                        values.to_vec()
                    };
                    let mut attr = self.ctx.registry().create(desc.base(), initial);
                    self.classify(&mut attr, &required);
                    if let Some(original) = originals.get(&lc) {
                        if let Some(untagged) = &original.untagged {
                            attr.set_original_values(untagged.clone());
                        }
                        for (tag, tagged) in &original.tagged {
                            attr.set_original_lang_tag(tag.clone(), tagged.clone());
                        }
                    }
                    attributes.push(attr);
                    index.insert(lc, attributes.len() - 1);
                    attributes.len() - 1
                }
            };

            if desc.has_options() {
                attributes[idx].set_lang_tag(desc.tag_key(), values.to_vec());
            }
        }

        sort_attributes(self.ctx.display_order(), &mut attributes);
        let index = attributes
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name_lc().to_string(), i))
            .collect();

        debug!(
            dn = %self.dn,
            attributes = attributes.len(),
            track_original,
            "materialized entry attributes"
        );
        Materialized { attributes, index }
    }

    /// RDN, required and internal flags for a freshly created attribute.
    fn classify(&self, attr: &mut Attribute, required: &HashMap<String, Vec<String>>) {
        if self.dn.is_named_by(attr.name()) {
            attr.set_rdn();
        }
        if let Some(classes) = required.get(attr.name_lc()) {
            attr.required_by(classes.iter().cloned());
        }
        if !attr.is_internal() {
            match self.ctx.schema().attribute_type(attr.name()) {
                Ok(Some(def)) if def.is_operational() => attr.set_internal(),
                Ok(_) => {}
                Err(e) => warn!(
                    attribute = attr.name(),
                    error = %e,
                    "attribute type lookup failed, treating as user attribute"
                ),
            }
        }
    }

    /// Lower-cased attribute name → object classes requiring it.
    ///
    /// A class the schema cannot answer for contributes nothing.
    fn required_by_attribute(&self) -> HashMap<String, Vec<String>> {
        let mut out: HashMap<String, Vec<String>> = HashMap::new();
        for class in self.object_classes() {
            match self.ctx.schema().required_attributes(&class) {
                Ok(names) => {
                    for name in names {
                        out.entry(name.to_lowercase()).or_default().push(class.clone());
                    }
                }
                Err(e) => warn!(
                    dn = %self.dn,
                    object_class = %class,
                    error = %e,
                    "schema lookup failed, attributes not marked required"
                ),
            }
        }
        out
    }

    fn original_values(&self) -> HashMap<String, OriginalValues> {
        let mut out: HashMap<String, OriginalValues> = HashMap::new();
        for (key, values) in self.original.iter() {
            let desc = AttributeDescription::parse(key);
            let slot = out.entry(desc.base().to_lowercase()).or_default();
            if desc.has_options() {
                slot.tagged.insert(desc.tag_key(), values.to_vec());
            } else {
                slot.untagged = Some(values.to_vec());
            }
        }
        out
    }
}
