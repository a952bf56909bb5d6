//! Bounded most-recent-first search history

/// Maximum number of remembered queries
pub const RECENT_SEARCH_LIMIT: usize = 10;

/// Distinct queries, most recent first, at most [`RECENT_SEARCH_LIMIT`] long
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from stored entries
    ///
    /// Stored data is not trusted: entries are trimmed, blanks and later
    /// duplicates dropped, and the result cut to the limit.
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            let entry = entry.trim();
            if entry.is_empty() || history.entries.iter().any(|e| e == entry) {
                continue;
            }
            history.entries.push(entry.to_string());
        }
        history.entries.truncate(RECENT_SEARCH_LIMIT);
        history
    }

    /// Move `query` to the front, inserting it if new
    ///
    /// Returns false for a blank query, which is never recorded.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        self.entries.retain(|e| e != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(RECENT_SEARCH_LIMIT);
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
