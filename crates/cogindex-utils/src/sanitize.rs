//! Sanitizers for user-supplied query-string values.
//!
//! Every value that ends up echoed back into a page or a link goes through one
//! of these first, so only a small set of characters ever survives.

use std::sync::LazyLock;

use regex::Regex;

static SEARCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^-a-zA-Z0-9 ]").expect("unable to compile search regex"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^-a-zA-Z0-9_]").expect("unable to compile tag regex"));

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("unable to compile digits regex"));

/// Keeps only ASCII letters, digits, `-` and spaces.
///
/// # Example
///
/// ```
/// use cogindex_utils::sanitize::sanitize_search;
///
/// assert_eq!(sanitize_search("<b>audio</b> player!"), "baudiob player");
/// ```
pub fn sanitize_search(input: &str) -> String {
    SEARCH_RE.replace_all(input, "").into_owned()
}

/// Keeps only ASCII letters, digits, `-` and `_`, then lower-cases the result.
pub fn sanitize_tag(input: &str) -> String {
    TAG_RE.replace_all(input, "").to_lowercase()
}

/// Extracts a page number from raw input.
///
/// Non-digit characters are dropped. Empty input, zero and values that do
/// not fit in a `usize` all fall back to the first page.
pub fn sanitize_page(input: &str) -> usize {
    DIGITS_RE
        .replace_all(input, "")
        .parse::<usize>()
        .ok()
        .filter(|&page| page > 0)
        .unwrap_or(1)
}
