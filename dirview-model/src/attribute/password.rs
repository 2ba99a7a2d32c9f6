//! Password comparison.
//!
//! Edit forms send back whatever the user typed. When that is the plaintext
//! of the stored hash the attribute has not materially changed, and writing
//! it back would only re-hash the same password under a new salt.

use dirview_crypto::{hash_password, PasswordScheme, StoredPassword};
use dirview_types::AttributeValue;

/// Whether two password value lists hold the same passwords.
///
/// Every current value must pair off with a distinct original value that is
/// either byte-identical or a hash the current value is the plaintext of.
/// The pairing is a full bipartite matching, so value order never matters.
pub(crate) fn values_equivalent(original: &[AttributeValue], current: &[AttributeValue]) -> bool {
    if original.len() != current.len() {
        return false;
    }

    let edges: Vec<Vec<usize>> = current
        .iter()
        .map(|candidate| {
            (0..original.len())
                .filter(|&i| value_matches(&original[i], candidate))
                .collect()
        })
        .collect();

    // paired[i]: index of the current value holding original value i.
    let mut paired: Vec<Option<usize>> = vec![None; original.len()];
    (0..current.len()).all(|c| {
        let mut visited = vec![false; original.len()];
        augment(c, &edges, &mut paired, &mut visited)
    })
}

/// Kuhn's augmenting path step: finds an original value for current value
/// `c`, moving earlier pairings along when that frees one up.
fn augment(
    c: usize,
    edges: &[Vec<usize>],
    paired: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &o in &edges[c] {
        if visited[o] {
            continue;
        }
        visited[o] = true;
        let free = match paired[o] {
            None => true,
            Some(other) => augment(other, edges, paired, visited),
        };
        if free {
            paired[o] = Some(c);
            return true;
        }
    }
    false
}

fn value_matches(stored: &AttributeValue, candidate: &AttributeValue) -> bool {
    if stored.as_bytes() == candidate.as_bytes() {
        return true;
    }
    let (Some(stored), Some(plaintext)) = (stored.as_text(), candidate.as_text()) else {
        return false;
    };
    // An unrecognized scheme cannot be recomputed, so only an exact match counts.
    StoredPassword::parse(stored).is_ok_and(|parsed| parsed.matches(plaintext))
}

/// Scheme of the first stored value, if it names one we can compute.
pub(crate) fn stored_scheme(values: &[AttributeValue]) -> Option<PasswordScheme> {
    let text = values.first()?.as_text()?;
    dirview_crypto::scheme_tag(text)?.parse().ok()
}

/// Prepares a value for writing: anything already carrying a `{SCHEME}`
/// prefix is kept, plaintext is hashed under `scheme`.
pub(crate) fn prepare_for_storage(value: &AttributeValue, scheme: PasswordScheme) -> AttributeValue {
    match value.as_text() {
        Some(text) if dirview_crypto::scheme_tag(text).is_none() => {
            AttributeValue::Text(hash_password(scheme, text))
        }
        _ => value.clone(),
    }
}

/// Masks the hash body for display, keeping the scheme visible.
pub(crate) fn mask(value: &AttributeValue) -> String {
    match value.as_text().and_then(dirview_crypto::scheme_tag) {
        Some(tag) => format!("{{{tag}}}********"),
        None => "********".to_string(),
    }
}
