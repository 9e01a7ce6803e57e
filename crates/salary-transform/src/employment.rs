//! Canonical form of multi-valued employment selections.
//!
//! The trained schema keys its employment indicators on the exact joined
//! string, so the same set of selections must always produce the same string
//! regardless of the order the user clicked them in.

use std::collections::BTreeSet;

/// Priority order for the known employment labels.
pub const EMPLOYMENT_ORDER: [&str; 8] = [
    "Employed, full-time",
    "Independent contractor, freelancer, or self-employed",
    "Employed, part-time",
    "Not employed, but looking for work",
    "Not employed, and not looking for work",
    "Student, full-time",
    "Student, part-time",
    "Retired",
];

/// Collapse employment selections into one `;`-joined string.
///
/// Known labels come first in [`EMPLOYMENT_ORDER`]; unknown labels follow in
/// lexicographic order. Blank entries and duplicates are dropped. Entries are
/// matched as given, without trimming.
pub fn canonicalize<I, S>(selections: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let selected: BTreeSet<String> = selections
        .into_iter()
        .filter(|selection| !selection.as_ref().trim().is_empty())
        .map(|selection| selection.as_ref().to_string())
        .collect();

    let ordered = EMPLOYMENT_ORDER
        .iter()
        .copied()
        .filter(|label| selected.contains(*label));
    // BTreeSet iteration is already lexicographic.
    let extras = selected
        .iter()
        .map(String::as_str)
        .filter(|label| !EMPLOYMENT_ORDER.contains(label));

    ordered.chain(extras).collect::<Vec<_>>().join(";")
}
