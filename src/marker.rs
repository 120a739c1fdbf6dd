//! Marker syntax: finding `[[namespace:key, args...]]` tokens in text and
//! taking them apart.
//!
//! Decomposition is deliberately literal. The argument list comes from
//! splitting the raw token on `,` (plus any following whitespace), while the
//! namespace and key come from splitting the token with its delimiters
//! removed on `:`. The lookup key is then cut at its first `,`.

use regex::Regex;
use std::sync::LazyLock;

static MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[[A-Za-z0-9_]+:.*?\]\]").expect("marker pattern is valid"));

static ARG_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*").expect("argument separator is valid"));

/// A parsed translation marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// The marker exactly as it appeared in the text, delimiters included
    pub raw: String,
    pub namespace: String,
    /// Everything after the first `:`; may contain further `:` and `,`
    pub key: String,
    /// Positional arguments, `%1` is `args[0]`
    pub args: Vec<String>,
}

impl Marker {
    /// Decompose a raw marker token
    ///
    /// Returns `None` when the namespace or the key is empty. Such markers are
    /// inert and stay in the text untouched.
    pub fn parse(raw: &str) -> Option<Marker> {
        let args = ARG_SEPARATOR
            .split(raw)
            .skip(1)
            .map(|arg| arg.replacen("]]", "", 1))
            .collect();

        let stripped = raw.replacen("[[", "", 1).replacen("]]", "", 1);
        let (namespace, key) = stripped.split_once(':').unwrap_or((stripped.as_str(), ""));
        if namespace.is_empty() || key.is_empty() {
            return None;
        }

        Some(Marker {
            raw: raw.to_string(),
            namespace: namespace.to_string(),
            key: key.to_string(),
            args,
        })
    }

    /// The key used for table lookup: `key` up to its first comma
    pub fn lookup_key(&self) -> &str {
        self.key.split(',').next().unwrap_or(&self.key)
    }
}

/// All markers in `text`, left to right, non-overlapping
///
/// A marker opens with `[[`, a namespace of ASCII word characters and a `:`.
/// A stray `[[` that is not followed by one is plain text. Repeated markers
/// are returned once per occurrence.
pub fn find_markers(text: &str) -> Vec<&str> {
    MARKER_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Text shown for a marker whose key has no translation: the last
/// `:`-separated segment with trailing `]` removed
///
/// `[[user:profile:edit]]` falls back to `edit`.
pub fn fallback_text(raw: &str) -> String {
    raw.rsplit(':')
        .next()
        .unwrap_or(raw)
        .trim_end_matches(']')
        .to_string()
}

/// Insert positional arguments into a translated value
///
/// `%1` receives `args[0]`, `%2` receives `args[1]`, and so on. Only the first
/// occurrence of each placeholder is replaced. Placeholders without a matching
/// argument stay literal and surplus arguments are ignored.
pub fn substitute_args(value: &str, args: &[String]) -> String {
    let mut result = value.to_string();
    for (index, arg) in args.iter().enumerate() {
        result = result.replacen(&format!("%{}", index + 1), arg, 1);
    }
    result
}

/// Build a marker from its parts: `compile(["ns:key", "a"])` is `[[ns:key, a]]`
pub fn compile<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = parts
        .into_iter()
        .map(|part| part.as_ref().to_string())
        .collect();
    format!("[[{}]]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_markers_in_order() {
        let text = "[[global:home]] and [[user:greeting, Ada]]";
        assert_eq!(
            find_markers(text),
            vec!["[[global:home]]", "[[user:greeting, Ada]]"]
        );
    }

    #[test]
    fn test_find_markers_keeps_duplicates() {
        let text = "[[ns:a]] [[ns:a]]";
        assert_eq!(find_markers(text), vec!["[[ns:a]]", "[[ns:a]]"]);
    }

    #[test]
    fn test_find_markers_none() {
        assert!(find_markers("plain text [with] brackets").is_empty());
        assert!(find_markers("[[]]").is_empty());
    }

    #[test]
    fn test_find_markers_skips_stray_brackets() {
        assert_eq!(find_markers("a [[ b [[global:home]]"), vec!["[[global:home]]"]);
        assert!(find_markers("[[my ns:x]]").is_empty());
        assert!(find_markers("[[:key]]").is_empty());
        assert_eq!(find_markers("[[ns:]]"), vec!["[[ns:]]"]);
    }

    #[test]
    fn test_find_markers_ignores_escaped_form() {
        assert!(find_markers(r"\[\[ns:key\]\]").is_empty());
    }

    #[test]
    fn test_parse_simple() {
        let marker = Marker::parse("[[global:home]]").unwrap();
        assert_eq!(marker.namespace, "global");
        assert_eq!(marker.key, "home");
        assert!(marker.args.is_empty());
        assert_eq!(marker.lookup_key(), "home");
    }

    #[test]
    fn test_parse_with_args() {
        let marker = Marker::parse("[[user:greeting, Ada,Lovelace]]").unwrap();
        assert_eq!(marker.namespace, "user");
        assert_eq!(marker.key, "greeting, Ada,Lovelace");
        assert_eq!(marker.lookup_key(), "greeting");
        assert_eq!(marker.args, vec!["Ada", "Lovelace"]);
    }

    #[test]
    fn test_parse_key_with_colons() {
        let marker = Marker::parse("[[topic:posts:edit]]").unwrap();
        assert_eq!(marker.namespace, "topic");
        assert_eq!(marker.key, "posts:edit");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Marker::parse("[[:key]]"), None);
        assert_eq!(Marker::parse("[[ns:]]"), None);
        assert_eq!(Marker::parse("[[nocolon]]"), None);
    }

    #[test]
    fn test_fallback_text() {
        assert_eq!(fallback_text("[[ns:missing]]"), "missing");
        assert_eq!(fallback_text("[[user:profile:edit]]"), "edit");
        assert_eq!(fallback_text("[[ns:key, a:b]]"), "b");
    }

    #[test]
    fn test_substitute_args() {
        let args = vec!["world".to_string(), "again".to_string()];
        assert_eq!(substitute_args("hello %1", &args), "hello world");
        assert_eq!(substitute_args("%2, %1", &args), "again, world");
    }

    #[test]
    fn test_substitute_args_missing_and_surplus() {
        assert_eq!(substitute_args("%1 and %2", &["one".to_string()]), "one and %2");
        assert_eq!(
            substitute_args("no placeholders", &["unused".to_string()]),
            "no placeholders"
        );
    }

    #[test]
    fn test_substitute_args_first_occurrence_only() {
        assert_eq!(substitute_args("%1 %1", &["x".to_string()]), "x %1");
    }

    #[test]
    fn test_compile() {
        assert_eq!(compile(["ns:key"]), "[[ns:key]]");
        assert_eq!(compile(["user:greeting", "Ada", "3"]), "[[user:greeting, Ada, 3]]");

        let compiled = compile(vec!["user:greeting".to_string(), "Ada".to_string()]);
        let marker = Marker::parse(&compiled).unwrap();
        assert_eq!(marker.lookup_key(), "greeting");
        assert_eq!(marker.args, vec!["Ada"]);
    }
}
