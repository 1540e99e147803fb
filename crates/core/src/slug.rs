//! Slug generation for event types, categories and event messages.
//!
//! Slugs are assigned once, when a record is first created, and are never
//! recomputed on rename.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("static regex"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("static regex"));

/// Convert arbitrary text into a URL-safe slug.
///
/// Non-ASCII characters are dropped, anything that is not a word character,
/// whitespace or hyphen is removed, the result is trimmed and lowercased,
/// and runs of whitespace/hyphens collapse into a single `-`.
///
/// ```
/// use hostwatch_core::slug::slugify;
/// assert_eq!(slugify("Disk Full!"), "disk-full");
/// assert_eq!(slugify("  a_b  c "), "a_b-c");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii: String = text.chars().filter(char::is_ascii).collect();
    let cleaned = DISALLOWED.replace_all(&ascii, "");
    let lowered = cleaned.trim().to_lowercase();
    SEPARATORS.replace_all(&lowered, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_words() {
        assert_eq!(slugify("Host Down"), "host-down");
    }

    #[test]
    fn punctuation_is_removed() {
        assert_eq!(slugify("CPU load > 90%!"), "cpu-load-90");
    }

    #[test]
    fn underscores_survive() {
        assert_eq!(slugify("  a_b  c "), "a_b-c");
    }

    #[test]
    fn hyphen_runs_collapse() {
        assert_eq!(slugify("foo -- bar"), "foo-bar");
    }

    #[test]
    fn non_ascii_dropped() {
        assert_eq!(slugify("Zażółć gęślą"), "za-gl");
    }

    #[test]
    fn uppercase_type_names() {
        assert_eq!(slugify("CRITICAL"), "critical");
    }

    #[test]
    fn empty_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
