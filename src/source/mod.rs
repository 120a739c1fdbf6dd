//! Sources of translation tables
//!
//! A [`TableSource`] fetches the table for one (language, namespace) pair.
//! Sources report failures as [`LoadError`]; deciding what to do with a
//! failure (log it, cache an empty table) is the store's job.
//!
//! Available sources:
//!
//! - [`FsSource`]: `<root>/<language>/<namespace>.json` on local disk
//! - [`HttpSource`]: `GET <base>/language/<language>/<namespace>.json`
//! - [`MockSource`]: in-memory tables for tests

pub mod fs;
pub mod http;
pub mod mock;

pub use fs::FsSource;
pub use http::HttpSource;
pub use mock::{MockMode, MockSource};

use crate::TranslationTable;
use crate::error::{LoadError, LoadResult};
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// Generic trait for translation table transports
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch the table for `namespace` in `language`
    ///
    /// Called at most once per (language, namespace) at a time: the store
    /// deduplicates concurrent requests before they get here.
    async fn fetch(&self, language: &str, namespace: &str) -> LoadResult<TranslationTable>;

    /// Name of this source, used in log messages
    fn source_name(&self) -> &str;
}

/// Build a table from a decoded JSON document
///
/// The root must be an object. String values become messages; anything else
/// is skipped with a warning.
pub fn table_from_json(json: Value) -> LoadResult<TranslationTable> {
    let Value::Object(obj) = json else {
        return Err(LoadError::Parse("root must be an object".to_string()));
    };

    let mut table = TranslationTable::new();
    for (key, value) in obj {
        match value {
            Value::String(message) => {
                table.0.insert(key, message);
            }
            _ => warn!("Message '{}' is not a string, skipping", key),
        }
    }
    Ok(table)
}

/// Parse the text of a `<namespace>.json` file
pub fn parse_table(content: &str) -> LoadResult<TranslationTable> {
    let json: Value = serde_json::from_str(content)?;
    table_from_json(json)
}

/// Whether `segment` can be used as a single path component
///
/// Languages and namespaces come from marker text, so they must not be able
/// to walk out of the language directory.
pub(crate) fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '?', '#'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        let table = parse_table(r#"{"home": "Home", "greeting": "Hello %1"}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_message("greeting").unwrap(), "Hello %1");
    }

    #[test]
    fn test_parse_table_skips_non_strings() {
        let table = parse_table(r#"{"home": "Home", "count": 3, "nested": {"a": "b"}}"#).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get_message("count").is_none());
    }

    #[test]
    fn test_parse_table_rejects_non_object() {
        assert!(matches!(parse_table("[1, 2]"), Err(LoadError::Parse(_))));
        assert!(matches!(parse_table("{ broken"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_is_safe_segment() {
        assert!(is_safe_segment("en"));
        assert!(is_safe_segment("pt-BR"));
        assert!(is_safe_segment("admin_settings"));
        assert!(!is_safe_segment(""));
        assert!(!is_safe_segment(".."));
        assert!(!is_safe_segment("../etc"));
        assert!(!is_safe_segment("a\\b"));
    }
}
