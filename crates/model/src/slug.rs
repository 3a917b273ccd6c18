//! Slug derivation and format rules
//!
//! A slug is lowercase ASCII alphanumerics separated by single hyphens, with
//! no leading, trailing or doubled hyphens.

use regex::Regex;
use std::sync::LazyLock;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid"));

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("separator pattern is valid"));

/// Derive a slug from a title
///
/// Lowercases the title, turns every run of other characters into a single
/// hyphen and trims hyphens from both ends. A title with no usable
/// characters yields an empty string.
pub fn derive_slug(title: &str) -> String {
    let lower = title.to_lowercase();
    SEPARATOR_RE
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Check a slug against the format rule
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}
