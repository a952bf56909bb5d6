//! Catalog search with per-query caching and recent-search history

mod history;

pub use history::{RecentSearches, RECENT_SEARCH_LIMIT};

use crate::catalog::{CatalogClient, MAX_RESULTS_LIMIT};
use crate::storage::{load_json, save_json, KeyValueStore, RECENT_SEARCHES_KEY};
use crate::types::BookRecord;
use std::collections::HashMap;
use std::sync::Arc;

/// Result count used by [`CatalogSearchService::search`]
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Cache key for a query: trimmed and lower-cased
pub fn cache_key(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Searches the catalog and remembers what was searched
///
/// Results are cached for the lifetime of the service; only the history is
/// persisted. Concurrent searches are not coalesced or cancelled: a caller
/// firing overlapping searches (typing without debouncing, for instance) must
/// track which response belongs to which request itself.
pub struct CatalogSearchService<C> {
    client: C,
    store: Arc<dyn KeyValueStore>,
    cache: HashMap<String, Vec<BookRecord>>,
    history: RecentSearches,
}

impl<C: CatalogClient> CatalogSearchService<C> {
    /// Create a service with empty history; call [`load`](Self::load) to
    /// pick up persisted state
    pub fn new(client: C, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            client,
            store,
            cache: HashMap::new(),
            history: RecentSearches::new(),
        }
    }

    /// Create a service and load the persisted history
    pub fn open(client: C, store: Arc<dyn KeyValueStore>) -> Self {
        let mut service = Self::new(client, store);
        service.load();
        service
    }

    /// Replace the in-memory history with the persisted one
    ///
    /// Unreadable or corrupt history falls back to empty.
    pub fn load(&mut self) {
        self.history = match load_json::<Vec<String>>(self.store.as_ref(), RECENT_SEARCHES_KEY) {
            Ok(Some(entries)) => RecentSearches::from_entries(entries),
            Ok(None) => RecentSearches::new(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load recent searches, starting empty");
                RecentSearches::new()
            }
        };
    }

    /// Search with [`DEFAULT_MAX_RESULTS`]
    pub async fn search(&mut self, query: &str) -> Vec<BookRecord> {
        self.search_books(query, DEFAULT_MAX_RESULTS).await
    }

    /// Search the catalog for `query`
    ///
    /// A blank query returns nothing without touching the network, the cache
    /// or the history. A cached query is answered from memory and leaves the
    /// history as it is; only a successful catalog request records a query.
    /// Any catalog failure is logged and yields an empty list, and nothing is
    /// cached or recorded for it.
    pub async fn search_books(&mut self, query: &str, max_results: u32) -> Vec<BookRecord> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let key = cache_key(query);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(query = %key, results = cached.len(), "serving search from cache");
            return cached.clone();
        }

        let max_results = max_results.clamp(1, MAX_RESULTS_LIMIT);
        let response = match self.client.search_volumes(query, max_results).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, query = %query, "error searching books");
                return Vec::new();
            }
        };

        let books = response.into_records();
        tracing::info!(query = %query, results = books.len(), "catalog search completed");

        self.cache.insert(key, books.clone());
        if self.history.record(query) {
            self.persist_history();
        }

        books
    }

    /// Queries searched so far, most recent first
    pub fn recent_searches(&self) -> &[String] {
        self.history.entries()
    }

    /// Forget all cached results; the history is kept
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Forget the search history and persist the empty list
    pub fn clear_recent_searches(&mut self) {
        self.history.clear();
        self.persist_history();
    }

    /// Number of queries currently answered from cache
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    fn persist_history(&self) {
        if let Err(e) = save_json(
            self.store.as_ref(),
            RECENT_SEARCHES_KEY,
            self.history.entries(),
        ) {
            tracing::error!(error = %e, "error saving recent searches");
        }
    }
}
