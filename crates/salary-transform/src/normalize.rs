//! Formatting-insensitive normalization of categorical values.

use std::sync::LazyLock;

use regex::Regex;

/// Any whitespace run touching a `;` separator, including the separator.
static SEPARATOR_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*;\s*").expect("Invalid separator regex"));

/// The organization-size phrase as typed with a straight apostrophe.
const DONT_KNOW_STRAIGHT: &str = "I don't know";

/// The same phrase with the U+2019 glyph the schema column was authored with.
const DONT_KNOW_TYPOGRAPHIC: &str = "I don\u{2019}t know";

/// Trim a value and collapse whitespace around `;` separators.
///
/// Casing and wording are never changed, so `"A ; B"` and `"A;B"` normalize
/// identically while `"a;b"` stays distinct.
pub fn normalize(value: &str) -> String {
    SEPARATOR_WHITESPACE
        .replace_all(value.trim(), ";")
        .into_owned()
}

/// [`normalize`] plus the organization-size apostrophe rule.
///
/// Only the "I don't know" answer is rewritten to the typographic apostrophe.
/// This is applied to `OrgSize` and nowhere else.
pub fn normalize_org_size(value: &str) -> String {
    let normalized = normalize(value);
    if normalized.contains(DONT_KNOW_STRAIGHT) {
        normalized.replace(DONT_KNOW_STRAIGHT, DONT_KNOW_TYPOGRAPHIC)
    } else {
        normalized
    }
}
