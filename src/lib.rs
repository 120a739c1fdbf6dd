//! Resolve `[[namespace:key, arg1, arg2]]` translation markers embedded in text.
//!
//! Translation tables are stored per language and per namespace. They are
//! fetched on first use from a [`TableSource`] (a directory of JSON files or an
//! HTTP endpoint), cached for the lifetime of the [`TranslationStore`], and
//! shared by every request that needs them: concurrent requests for the same
//! (language, namespace) pair trigger exactly one fetch.
//!
//! # Example
//!
//! ```ignore
//! use marker_i18n::{Config, Translator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let translator = Translator::from_config(&Config::from_env())?;
//!     let text = translator.translate("[[global:welcome, Ada]]", "fr").await;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```
use std::collections::HashMap;

pub mod config;
pub mod error;
pub mod escape;
pub mod marker;
pub mod resolver;
pub mod source;
pub mod store;


pub use config::Config;
pub use error::{LoadError, LoadResult};
pub use escape::{escape, unescape};
pub use marker::{Marker, compile, fallback_text, find_markers, substitute_args};
pub use resolver::Translator;
pub use source::{FsSource, HttpSource, MockMode, MockSource, TableSource};
pub use store::TranslationStore;

/// Language used when a caller does not name one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Key to translated string mapping for one (language, namespace) pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable(pub HashMap<String, String>);

impl TranslationTable {
    pub fn new() -> Self {
        TranslationTable(HashMap::new())
    }
    pub fn with_message(&mut self, key: &str, message: &str) -> &mut Self {
        self.0.insert(key.to_owned(), message.to_owned());
        self
    }
    pub fn get_message(&self, key: &str) -> Option<&String> {
        self.0.get(key)
    }
    pub fn get_messages(&self) -> &HashMap<String, String> {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for TranslationTable {
    fn from(messages: HashMap<String, String>) -> Self {
        TranslationTable(messages)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TranslationTable(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
