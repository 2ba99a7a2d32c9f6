use std::cmp::Ordering;

use crate::Attribute;

/// Display ordering of attributes.
///
/// Attributes named in `order` (lower-cased) come first, in list order.
/// The rest follow, alphabetically ignoring case.
pub fn display_order_cmp(order: &[String], a: &Attribute, b: &Attribute) -> Ordering {
    if std::ptr::eq(a, b) {
        return Ordering::Equal;
    }

    let unlisted = order.len() + 1;
    let a_key = order.iter().position(|n| n == a.name_lc()).unwrap_or(unlisted);
    let b_key = order.iter().position(|n| n == b.name_lc()).unwrap_or(unlisted);

    if a_key == b_key {
        return a.name_lc().cmp(b.name_lc());
    }
    a_key.cmp(&b_key)
}

/// Sorts attributes in place; stable.
pub fn sort_attributes(order: &[String], attributes: &mut [Attribute]) {
    attributes.sort_by(|a, b| display_order_cmp(order, a, b));
}
