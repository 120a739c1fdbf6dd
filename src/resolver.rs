//! Marker resolution: turn text with `[[namespace:key]]` markers into
//! translated text.
//!
//! Every marker in a call is resolved in its own task. The result is assembled
//! once all of them have finished, in whatever order they finish.
//!
//! Replacement is textual: resolving a marker replaces every occurrence of its
//! raw text. Identical markers in one string therefore always get the same
//! translation.

use crate::config::Config;
use crate::error::LoadResult;
use crate::marker::{Marker, fallback_text, find_markers, substitute_args};
use crate::store::TranslationStore;
use crate::{DEFAULT_LANGUAGE, TranslationTable};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error};

#[derive(Clone)]
pub struct Translator {
    store: Arc<TranslationStore>,
    default_language: String,
}

impl Translator {
    pub fn new(store: Arc<TranslationStore>) -> Self {
        Translator {
            store,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Build a translator and its store from configuration
    pub fn from_config(config: &Config) -> LoadResult<Self> {
        let store = TranslationStore::new(config.build_source()?);
        let mut translator = Translator::new(Arc::new(store));
        translator.with_default_language(&config.default_language);
        Ok(translator)
    }

    pub fn with_default_language(&mut self, language: &str) -> &mut Self {
        self.default_language = language.to_string();
        self
    }

    pub fn get_default_language(&self) -> &str {
        &self.default_language
    }

    pub fn store(&self) -> &Arc<TranslationStore> {
        &self.store
    }

    /// Replace every marker in `text` with its translation in `language`
    ///
    /// An empty `language` means the default language. Text without markers
    /// is returned as is without touching the store. Markers with an empty
    /// namespace or key are left in place. Markers whose key has no
    /// translation are replaced with [`fallback_text`].
    pub async fn translate(&self, text: &str, language: &str) -> String {
        let markers = find_markers(text);
        if markers.is_empty() {
            return text.to_string();
        }

        let language = if language.is_empty() {
            self.default_language.as_str()
        } else {
            language
        };

        let mut tasks = JoinSet::new();
        for raw in markers {
            let Some(marker) = Marker::parse(raw) else {
                debug!("Ignoring malformed marker {}", raw);
                continue;
            };
            let store = Arc::clone(&self.store);
            let language = language.to_string();
            tasks.spawn(async move {
                let table = store.get_translations(&language, &marker.namespace).await;
                let replacement = resolve_marker(&marker, &table);
                (marker.raw, replacement)
            });
        }

        let mut result = text.to_string();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((raw, replacement)) => result = result.replace(&raw, &replacement),
                Err(err) => error!("Marker resolution task failed: {}", err),
            }
        }
        result
    }

    /// [`Translator::translate`] in the default language
    pub async fn translate_default(&self, text: &str) -> String {
        self.translate(text, "").await
    }
}

/// The text a marker resolves to once its table is available
fn resolve_marker(marker: &Marker, table: &TranslationTable) -> String {
    match table.get_message(marker.lookup_key()) {
        Some(value) if !value.is_empty() => substitute_args(value, &marker.args),
        _ => fallback_text(&marker.raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MockMode, MockSource};

    fn translator_with(tables: Vec<(&'static str, &'static str, TranslationTable)>) -> Translator {
        Translator::new(Arc::new(TranslationStore::new(Arc::new(
            MockSource::with_tables(tables),
        ))))
    }

    fn table(pairs: &[(&str, &str)]) -> TranslationTable {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_resolve_marker_found() {
        let marker = Marker::parse("[[ns:key, world]]").unwrap();
        let table = table(&[("key", "hello %1")]);
        assert_eq!(resolve_marker(&marker, &table), "hello world");
    }

    #[test]
    fn test_resolve_marker_missing_key() {
        let marker = Marker::parse("[[ns:missing]]").unwrap();
        assert_eq!(resolve_marker(&marker, &TranslationTable::new()), "missing");
    }

    #[test]
    fn test_resolve_marker_empty_value_falls_back() {
        let marker = Marker::parse("[[ns:blank]]").unwrap();
        let table = table(&[("blank", "")]);
        assert_eq!(resolve_marker(&marker, &table), "blank");
    }

    #[tokio::test]
    async fn test_translate_plain_text() {
        let translator = translator_with(vec![]);
        assert_eq!(translator.translate("", "en").await, "");
        assert_eq!(translator.translate("no markers", "en").await, "no markers");
    }

    #[tokio::test]
    async fn test_translate_with_args() {
        let translator = translator_with(vec![("en", "ns", table(&[("key", "hello %1")]))]);
        assert_eq!(translator.translate("[[ns:key, world]]", "en").await, "hello world");
    }

    #[tokio::test]
    async fn test_translate_empty_language_uses_default() {
        let mut translator =
            translator_with(vec![("de", "global", table(&[("home", "Startseite")]))]);
        translator.with_default_language("de");

        assert_eq!(translator.get_default_language(), "de");
        assert_eq!(translator.translate("[[global:home]]", "").await, "Startseite");
        assert_eq!(translator.translate_default("[[global:home]]").await, "Startseite");
    }

    #[tokio::test]
    async fn test_translate_mixed_text() {
        let translator = translator_with(vec![
            ("fr", "global", table(&[("home", "Accueil")])),
            ("fr", "user", table(&[("greeting", "Bonjour %1, vous avez %2 messages")])),
        ]);

        let text = "<a>[[global:home]]</a> [[user:greeting, Ada, 3]] [[:bad]]";
        assert_eq!(
            translator.translate(text, "fr").await,
            "<a>Accueil</a> Bonjour Ada, vous avez 3 messages [[:bad]]"
        );
    }
}
