//! Escaping of marker syntax, for text that must show `[[...]]` literally.
//!
//! `escape("[[ns:key]]")` is `\[\[ns:key\]\]`, which `find_markers` never
//! matches. `unescape` reverses it. `unescape(escape(s)) == s` holds for any
//! `s` that does not already contain escaped brackets.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static MARKER_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]").expect("marker shape pattern is valid"));

static ESCAPED_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\\[\\\[(.*?)\\\]\\\]").expect("escaped marker pattern is valid")
});

/// Backslash-escape both bracket pairs of every `[[...]]` in `text`
pub fn escape(text: &str) -> String {
    MARKER_SHAPE
        .replace_all(text, |caps: &Captures| format!(r"\[\[{}\]\]", &caps[1]))
        .into_owned()
}

/// Turn every `\[\[...\]\]` in `text` back into `[[...]]`
pub fn unescape(text: &str) -> String {
    ESCAPED_SHAPE
        .replace_all(text, |caps: &Captures| format!("[[{}]]", &caps[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::find_markers;

    #[test]
    fn test_escape_marker() {
        assert_eq!(escape("[[ns:key]]"), r"\[\[ns:key\]\]");
        assert_eq!(
            escape("say [[user:greeting, Ada]] twice"),
            r"say \[\[user:greeting, Ada\]\] twice"
        );
    }

    #[test]
    fn test_escaped_text_has_no_markers() {
        let escaped = escape("[[a:b]] [[c:d, e]]");
        assert!(find_markers(&escaped).is_empty());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"\[\[ns:key\]\]"), "[[ns:key]]");
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            "",
            "no markers at all",
            "[[ns:key]]",
            "before [[ns:key, 1, 2]] middle [[other:thing]] after",
            "[[a]]b]] and [[x [[y]]",
            "single [brackets] are untouched",
        ];
        for sample in samples {
            assert_eq!(unescape(&escape(sample)), sample, "sample: {:?}", sample);
        }
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape("hello"), "hello");
        assert_eq!(unescape("hello"), "hello");
    }
}
