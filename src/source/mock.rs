//! Mock table source for testing
//!
//! Serves tables from memory, optionally after a simulated network delay, and
//! counts how many fetches reached it. The count is what deduplication tests
//! assert on.
//!
//! # Example
//!
//! ```ignore
//! use marker_i18n::{MockMode, MockSource, TableSource};
//!
//! #[tokio::test]
//! async fn test_fetch() {
//!     let mock = MockSource::new(MockMode::Empty);
//!     let table = mock.fetch("en", "global").await.unwrap();
//!     assert!(table.is_empty());
//!     assert_eq!(mock.fetch_count(), 1);
//! }
//! ```

use crate::TranslationTable;
use crate::error::{LoadError, LoadResult};
use crate::source::TableSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock behaviours
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Serve predefined tables keyed by (language, namespace); unknown pairs
    /// get an empty table
    Tables(HashMap<(String, String), TranslationTable>),

    /// Every fetch fails with a parse error carrying this message
    Error(String),

    /// Every fetch returns an empty table
    Empty,
}

/// Deterministic in-memory source
#[derive(Debug)]
pub struct MockSource {
    mode: MockMode,
    /// Simulated latency per fetch, in milliseconds
    delay_ms: u64,
    fetches: AtomicUsize,
}

impl MockSource {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Convenience constructor from `(language, namespace, table)` triples
    pub fn with_tables<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str, TranslationTable)>,
    {
        let tables = tables
            .into_iter()
            .map(|(language, namespace, table)| {
                ((language.to_string(), namespace.to_string()), table)
            })
            .collect();
        Self::new(MockMode::Tables(tables))
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

#[async_trait]
impl TableSource for MockSource {
    async fn fetch(&self, language: &str, namespace: &str) -> LoadResult<TranslationTable> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;

        match &self.mode {
            MockMode::Tables(tables) => Ok(tables
                .get(&(language.to_string(), namespace.to_string()))
                .cloned()
                .unwrap_or_default()),
            MockMode::Error(msg) => Err(LoadError::Parse(msg.clone())),
            MockMode::Empty => Ok(TranslationTable::new()),
        }
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}
