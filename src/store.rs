//! Per-language, per-namespace cache of translation tables
//!
//! Each namespace of a language is in exactly one of three states: not
//! started, pending (a fetch is in flight) or loaded. Only one fetch per
//! (language, namespace) is ever in flight. Callers that arrive while it is
//! pending park on a oneshot channel and receive the same table when the
//! fetch completes. Parked callers are woken most recent first; no order is
//! guaranteed relative to the caller that started the fetch.
//!
//! A failed fetch is logged and cached as an empty table, so it is not retried
//! automatically. Use [`TranslationStore::reload`] to force a new fetch.
//!
//! The store is meant to be built once at startup and shared behind an `Arc`.
//! Entries are never evicted. The internal lock is never held across an
//! `.await`.

use crate::TranslationTable;
use crate::source::TableSource;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::{debug, error};

type Waiter = oneshot::Sender<Arc<TranslationTable>>;

#[derive(Default)]
struct LanguageCache {
    loaded: HashMap<String, Arc<TranslationTable>>,
    pending: HashSet<String>,
    waiters: HashMap<String, Vec<Waiter>>,
}

/// What a `load` call has to do after inspecting the cache
enum Slot {
    Ready(Arc<TranslationTable>),
    Wait(oneshot::Receiver<Arc<TranslationTable>>),
    Fetch,
}

pub struct TranslationStore {
    source: Arc<dyn TableSource>,
    // Keyed by language, e.g. languages["fr"].loaded["global"]
    languages: Mutex<HashMap<String, LanguageCache>>,
}

impl TranslationStore {
    pub fn new(source: Arc<dyn TableSource>) -> Self {
        TranslationStore {
            source,
            languages: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &Arc<dyn TableSource> {
        &self.source
    }

    fn languages(&self) -> MutexGuard<'_, HashMap<String, LanguageCache>> {
        self.languages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a table without fetching it, replacing any loaded one
    pub fn add_translation(&self, language: &str, namespace: &str, table: TranslationTable) {
        self.languages()
            .entry(language.to_string())
            .or_default()
            .loaded
            .insert(namespace.to_string(), Arc::new(table));
    }

    /// True once a fetch (or registration) has completed and none is in flight
    pub fn is_loaded(&self, language: &str, namespace: &str) -> bool {
        self.languages().get(language).is_some_and(|cache| {
            cache.loaded.contains_key(namespace) && !cache.pending.contains(namespace)
        })
    }

    pub fn is_pending(&self, language: &str, namespace: &str) -> bool {
        self.languages()
            .get(language)
            .is_some_and(|cache| cache.pending.contains(namespace))
    }

    /// The table for `namespace` in `language`, fetching it if needed
    ///
    /// A registered or loaded table is returned without suspending, even
    /// while a fetch for the same pair is in flight.
    pub async fn get_translations(
        &self,
        language: &str,
        namespace: &str,
    ) -> Arc<TranslationTable> {
        let cached = self
            .languages()
            .get(language)
            .and_then(|cache| cache.loaded.get(namespace).cloned());
        match cached {
            Some(table) => table,
            None => self.load(language, namespace).await,
        }
    }

    /// Load the table for `namespace` in `language`
    ///
    /// Never fails: a fetch error yields an empty table.
    pub async fn load(&self, language: &str, namespace: &str) -> Arc<TranslationTable> {
        loop {
            match self.claim(language, namespace) {
                Slot::Ready(table) => return table,
                Slot::Fetch => return self.fetch_and_publish(language, namespace).await,
                Slot::Wait(rx) => match rx.await {
                    Ok(table) => return table,
                    // The fetching task went away before finishing
                    Err(_) => debug!(
                        "Fetch of '{}' for '{}' was abandoned, retrying",
                        namespace, language
                    ),
                },
            }
        }
    }

    /// Drop the cached table and fetch it again
    ///
    /// If a fetch is already in flight, this joins it instead.
    pub async fn reload(&self, language: &str, namespace: &str) -> Arc<TranslationTable> {
        {
            let mut languages = self.languages();
            if let Some(cache) = languages.get_mut(language) {
                if !cache.pending.contains(namespace) {
                    cache.loaded.remove(namespace);
                }
            }
        }
        self.load(language, namespace).await
    }

    fn claim(&self, language: &str, namespace: &str) -> Slot {
        let mut languages = self.languages();
        let cache = languages.entry(language.to_string()).or_default();

        if cache.pending.contains(namespace) {
            let (tx, rx) = oneshot::channel();
            cache
                .waiters
                .entry(namespace.to_string())
                .or_default()
                .push(tx);
            debug!("Waiting for in-flight fetch of '{}' for '{}'", namespace, language);
            return Slot::Wait(rx);
        }

        if let Some(table) = cache.loaded.get(namespace) {
            return Slot::Ready(Arc::clone(table));
        }

        cache.pending.insert(namespace.to_string());
        Slot::Fetch
    }

    async fn fetch_and_publish(&self, language: &str, namespace: &str) -> Arc<TranslationTable> {
        let guard = PendingGuard {
            store: self,
            language,
            namespace,
            armed: true,
        };

        let table = match self.source.fetch(language, namespace).await {
            Ok(table) => table,
            Err(err) => {
                error!(
                    "Could not load '{}' for '{}' from {}: {}. Skipping...",
                    namespace,
                    language,
                    self.source.source_name(),
                    err
                );
                TranslationTable::new()
            }
        };
        let table = Arc::new(table);
        guard.disarm();

        let mut waiters = {
            let mut languages = self.languages();
            let cache = languages.entry(language.to_string()).or_default();
            cache.loaded.insert(namespace.to_string(), Arc::clone(&table));
            cache.pending.remove(namespace);
            cache.waiters.remove(namespace).unwrap_or_default()
        };

        while let Some(waiter) = waiters.pop() {
            let _ = waiter.send(Arc::clone(&table));
        }
        table
    }
}

/// Clears the pending mark if a fetch is dropped before it completes, so that
/// parked callers retry instead of waiting forever
struct PendingGuard<'a> {
    store: &'a TranslationStore,
    language: &'a str,
    namespace: &'a str,
    armed: bool,
}

impl PendingGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut languages = self.store.languages();
        if let Some(cache) = languages.get_mut(self.language) {
            cache.pending.remove(self.namespace);
            // Dropping the senders wakes the receivers with an error
            cache.waiters.remove(self.namespace);
        }
    }
}
