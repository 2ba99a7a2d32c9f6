mod common;

use std::sync::Arc;

use common::{ctx, ctx_with_order, person, person_raw, text};
use dirview_model::{AttributeKind, Entry, EntryContext};
use dirview_types::{Dn, RawAttributes};
use pretty_assertions::assert_eq;

fn names(entry: &Entry) -> Vec<&str> {
    entry.attributes().iter().map(|a| a.name()).collect()
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn load_parses_dn() {
    let entry = person();
    assert_eq!(entry.dn().as_str(), "uid=alice,ou=People,dc=example,dc=com");
    assert_eq!(entry.sort_key(), "uid=alice,ou=People,dc=example,dc=com");
}

#[test]
fn load_rejects_malformed_dn() {
    assert!(Entry::load("uid=alice,,dc=com", RawAttributes::new(), ctx()).is_err());
}

#[test]
fn object_classes_as_stored() {
    assert_eq!(
        person().object_classes(),
        vec!["top", "person", "organizationalPerson", "inetOrgPerson"]
    );
}

#[test]
fn fresh_entry_is_clean() {
    let entry = person();
    assert!(!entry.is_dirty());
    assert!(entry.dirty_attributes().is_empty());
    assert!(entry.removed_attributes().is_empty());
    assert!(entry.changes().is_empty());
}

// ── Materialization ──────────────────────────────────────────────

#[test]
fn attributes_are_typed_by_registry() {
    let entry = person();
    assert_eq!(entry.attribute("objectClass").unwrap().kind(), AttributeKind::ObjectClass);
    assert_eq!(entry.attribute("cn").unwrap().kind(), AttributeKind::Text);
    assert_eq!(entry.attribute("createTimestamp").unwrap().kind(), AttributeKind::Timestamp);
}

#[test]
fn lookup_ignores_case_and_tags() {
    let entry = person();
    assert_eq!(entry.attribute("MAIL").unwrap().name(), "mail");
    assert_eq!(entry.attribute("mail;lang-en").unwrap().name(), "mail");
    assert!(entry.attribute("telephoneNumber").is_none());
}

#[test]
fn materialization_is_memoized() {
    let entry = person();
    let first = entry.attributes().as_ptr();
    let second = entry.attributes().as_ptr();
    assert_eq!(first, second);
    assert_eq!(entry.attributes(), entry.attributes());
}

#[test]
fn tagged_keys_group_under_base_attribute() {
    let raw = RawAttributes::new()
        .with("objectClass", ["top"])
        .with("description", ["plain"])
        .with("description;lang-en", ["english"])
        .with("description;lang-en-us", ["american"]);
    let entry = Entry::load("cn=x", raw, ctx()).unwrap();

    let descriptions: Vec<_> = entry
        .attributes()
        .iter()
        .filter(|a| a.name_lc() == "description")
        .collect();
    assert_eq!(descriptions.len(), 1);

    let attr = descriptions[0];
    assert_eq!(attr.values(), text(&["plain"]).as_slice());
    assert_eq!(attr.lang_tag("lang-en").unwrap(), text(&["english"]).as_slice());
    assert_eq!(attr.lang_tag("lang-en-us").unwrap(), text(&["american"]).as_slice());
    assert_eq!(attr.lang_values().len(), 2);
}

#[test]
fn untagged_key_after_tagged_one_sets_base_values() {
    let raw = RawAttributes::new()
        .with("description;lang-de", ["deutsch"])
        .with("Description", ["plain"]);
    let entry = Entry::load("cn=x", raw, ctx()).unwrap();

    let attr = entry.attribute("description").unwrap();
    assert_eq!(attr.name(), "description");
    assert_eq!(attr.values(), text(&["plain"]).as_slice());
    assert_eq!(attr.lang_tag("lang-de").unwrap(), text(&["deutsch"]).as_slice());
}

#[test]
fn only_tagged_values_leave_base_empty() {
    let raw = RawAttributes::new().with("title;lang-fr", ["Directrice"]);
    let entry = Entry::load("cn=x", raw, ctx()).unwrap();
    let attr = entry.attribute("title").unwrap();
    assert!(attr.values().is_empty());
    assert_eq!(attr.lang_values().len(), 1);
}

#[test]
fn malformed_tag_key_is_its_own_attribute() {
    let raw = RawAttributes::new()
        .with("cn", ["x"])
        .with("cn;", ["odd"]);
    let entry = Entry::load("cn=x", raw, ctx()).unwrap();
    assert_eq!(entry.attributes().len(), 2);
    assert!(entry.attribute("cn").unwrap().lang_values().is_empty());
}

#[test]
fn empty_entry_has_no_attributes() {
    let entry = Entry::new(Dn::root(), RawAttributes::new(), ctx());
    assert!(entry.attributes().is_empty());
    assert!(entry.object_classes().is_empty());
}

// ── Display order ────────────────────────────────────────────────

#[test]
fn configured_order_first_then_alphabetical() {
    let raw = RawAttributes::new()
        .with("uid", ["alice"])
        .with("mail", ["a@example.com"])
        .with("sn", ["Example"])
        .with("cn", ["Alice"]);
    let entry = Entry::load("uid=alice", raw, ctx_with_order(&["cn", "sn"])).unwrap();
    assert_eq!(names(&entry), vec!["cn", "sn", "mail", "uid"]);
}

#[test]
fn display_order_ignores_case() {
    let raw = RawAttributes::new()
        .with("givenName", ["Alice"])
        .with("Mail", ["a@example.com"])
        .with("CN", ["Alice"]);
    let entry = Entry::load("cn=alice", raw, ctx_with_order(&["mail", "Cn"])).unwrap();
    assert_eq!(names(&entry), vec!["Mail", "CN", "givenName"]);
}

#[test]
fn without_order_everything_is_alphabetical() {
    let entry = person();
    assert_eq!(
        names(&entry),
        vec!["cn", "createTimestamp", "entryUUID", "mail", "objectClass", "sn", "uid"]
    );
}

// ── Flags ────────────────────────────────────────────────────────

#[test]
fn rdn_attribute_is_flagged() {
    let entry = person();
    let rdn: Vec<_> = entry.rdn_attributes().iter().map(|a| a.name()).collect();
    assert_eq!(rdn, vec!["uid"]);
}

#[test]
fn multi_valued_rdn_flags_every_attribute() {
    let raw = RawAttributes::new()
        .with("cn", ["Alice"])
        .with("uid", ["alice"])
        .with("sn", ["Example"]);
    let entry = Entry::load("cn=Alice+uid=alice,dc=example", raw, ctx()).unwrap();
    let rdn: Vec<_> = entry.rdn_attributes().iter().map(|a| a.name()).collect();
    assert_eq!(rdn, vec!["cn", "uid"]);
}

#[test]
fn required_attributes_are_flagged_with_their_classes() {
    let entry = person();
    let cn = entry.attribute("cn").unwrap();
    assert!(cn.is_required());
    assert!(cn.required_by_classes().contains("person"));
    assert!(cn.required_by_classes().contains("inetOrgPerson"));
    assert!(!entry.attribute("mail").unwrap().is_required());
    assert!(entry.attribute("objectClass").unwrap().is_required());
}

#[test]
fn required_by_records_only_listed_classes() {
    let raw = RawAttributes::new()
        .with("objectClass", ["inetOrgPerson"])
        .with("cn", ["Alice"])
        .with("sn", ["Example"]);
    let entry = Entry::load("cn=Alice,dc=example", raw, ctx()).unwrap();
    let classes: Vec<_> = entry
        .attribute("cn")
        .unwrap()
        .required_by_classes()
        .iter()
        .collect();
    assert_eq!(classes, vec!["inetOrgPerson"]);
}

#[test]
fn operational_attributes_are_internal() {
    let entry = person();
    let internal: Vec<_> = entry.internal_attributes().iter().map(|a| a.name()).collect();
    assert_eq!(internal, vec!["createTimestamp", "entryUUID"]);
    assert!(entry.visible_attributes().iter().all(|a| !a.is_internal()));
    assert_eq!(entry.visible_attributes().len(), 5);
}

#[test]
fn schema_operational_flag_marks_text_attribute_internal() {
    let mut registry = dirview_model::AttributeRegistry::empty();
    registry.register("objectClass", AttributeKind::ObjectClass);
    let ctx = ctx().with_registry(registry);
    let raw = RawAttributes::new().with("entryUUID", ["1234"]);
    let entry = Entry::load("cn=x", raw, ctx).unwrap();

    let attr = entry.attribute("entryUUID").unwrap();
    assert_eq!(attr.kind(), AttributeKind::Text);
    assert!(attr.is_internal());
}

// ── Original snapshot ────────────────────────────────────────────

#[test]
fn original_attributes_reflect_load_time() {
    let mut entry = person();
    entry.set_attribute("mail", text(&["new@example.com"]));

    assert_eq!(
        entry.original_attribute("mail").unwrap().values(),
        text(&["alice@example.com"]).as_slice()
    );
    assert_eq!(
        entry.attribute("mail").unwrap().original_values().unwrap(),
        text(&["alice@example.com"]).as_slice()
    );
}

#[test]
fn with_snapshots_tracks_pre_edited_entries() {
    let original = person_raw();
    let current = person_raw().with("sn", ["Changed"]);
    let entry = Entry::with_snapshots(
        Dn::parse("uid=alice,dc=example,dc=com").unwrap(),
        current,
        original,
        ctx(),
    );
    let dirty: Vec<_> = entry.dirty_attributes().iter().map(|a| a.name()).collect();
    assert_eq!(dirty, vec!["sn"]);
    assert!(entry.is_dirty());
}

#[test]
fn original_equivalence_uses_kind() {
    let original = RawAttributes::new()
        .with("objectClass", ["top", "person"])
        .with("userPassword", ["{SHA}5en6G6MezRroT3XKqkdPOmY/BfQ="])
        .with("sn", ["Example"]);
    let current = RawAttributes::new()
        .with("objectClass", ["PERSON", "TOP"])
        .with("userPassword", ["secret"])
        .with("sn", ["Changed"])
        .with("mail", ["new@example.com"]);
    let entry = Entry::with_snapshots(Dn::parse("cn=x").unwrap(), current, original, ctx());

    assert!(entry.original_is_equivalent("objectClass"));
    assert!(entry.original_is_equivalent("userPassword"));
    assert!(!entry.original_is_equivalent("sn"));
    assert!(!entry.original_is_equivalent("mail"));
}

#[test]
fn valueless_original_attribute_is_not_a_removal() {
    let original = RawAttributes::new().with("cn", ["x"]).with("mail", Vec::<&str>::new());
    let current = RawAttributes::new().with("cn", ["x"]);
    let entry = Entry::with_snapshots(Dn::parse("cn=x").unwrap(), current, original, ctx());

    assert!(entry.removed_attributes().is_empty());
    assert!(!entry.is_dirty());
    assert!(entry.changes().is_empty());
}

// ── Mutation and invalidation ────────────────────────────────────

#[test]
fn set_attribute_invalidates_view() {
    let mut entry = person();
    assert!(entry.attribute("telephoneNumber").is_none());

    entry.set_attribute("telephoneNumber", text(&["+1 555 0100"]));
    let phone = entry.attribute("telephoneNumber").unwrap();
    assert!(phone.is_dirty());
    assert!(phone.original_values().is_none());
}

#[test]
fn set_tagged_attribute() {
    let mut entry = person();
    entry.set_attribute("cn;lang-ja", text(&["アリス"]));
    let cn = entry.attribute("cn").unwrap();
    assert_eq!(cn.lang_tag("lang-ja").unwrap(), text(&["アリス"]).as_slice());
    assert!(cn.is_dirty());
}

#[test]
fn remove_attribute_drops_tagged_variants() {
    let raw = person_raw()
        .with("description", ["plain"])
        .with("description;lang-en", ["english"]);
    let mut entry = Entry::load("uid=alice,dc=example,dc=com", raw, ctx()).unwrap();

    entry.remove_attribute("Description");
    assert!(entry.attribute("description").is_none());
    assert!(!entry.raw().contains_key("description;lang-en"));
    assert_eq!(entry.removed_attributes(), vec!["description"]);
    assert!(entry.is_dirty());
}

#[test]
fn invalidate_rebuilds_the_same_view() {
    let mut entry = person();
    let before = entry.attributes().to_vec();
    entry.invalidate();
    assert_eq!(entry.attributes(), before.as_slice());
}

#[test]
fn clones_are_independent() {
    let entry = person();
    entry.attributes();
    let mut copy = entry.clone();
    copy.set_attribute("sn", text(&["Other"]));

    assert!(!entry.is_dirty());
    assert!(copy.is_dirty());
}

#[test]
fn context_is_shared_between_entries() {
    let ctx = EntryContext::new(Arc::new(dirview_schema::StaticSchema::core()))
        .with_display_order(["uid"]);
    let a_raw = RawAttributes::new().with("uid", ["a"]).with("cn", ["A"]);
    let b_raw = RawAttributes::new().with("cn", ["B"]).with("uid", ["b"]);
    let a = Entry::load("uid=a", a_raw, ctx.clone()).unwrap();
    let b = Entry::load("uid=b", b_raw, ctx).unwrap();
    assert_eq!(names(&a), vec!["uid", "cn"]);
    assert_eq!(names(&b), vec!["uid", "cn"]);
}
