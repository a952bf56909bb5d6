//! The user's persisted book collection

use crate::storage::{load_json, save_json, KeyValueStore, LIBRARY_KEY};
use crate::types::{clamp_progress, BookRecord, BookUpdate, LibraryBook, LibraryStats};
use chrono::Utc;
use std::sync::Arc;

/// Sole owner of the library collection
///
/// Books are kept newest first. Every mutation rewrites the whole collection
/// to the store; a failed write is logged and the in-memory collection stays
/// authoritative for the rest of the session.
pub struct LibraryService {
    store: Arc<dyn KeyValueStore>,
    books: Vec<LibraryBook>,
}

impl LibraryService {
    /// Create an empty service; call [`load`](Self::load) to pick up
    /// persisted state
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            books: Vec::new(),
        }
    }

    /// Create a service and load the persisted collection
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let mut service = Self::new(store);
        service.load();
        service
    }

    /// Replace the in-memory collection with the persisted one
    ///
    /// Unreadable or corrupt data falls back to an empty library.
    pub fn load(&mut self) {
        self.books = match load_json::<Vec<LibraryBook>>(self.store.as_ref(), LIBRARY_KEY) {
            Ok(Some(books)) => books,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "error loading library, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(books = self.books.len(), "library loaded");
    }

    /// Add a catalog record to the front of the library
    ///
    /// Returns false, changing nothing, if a book with the same id is
    /// already present.
    pub fn add_book(&mut self, book: BookRecord) -> bool {
        if self.has_book(&book.id) {
            tracing::debug!(book_id = %book.id, "book already in library");
            return false;
        }

        tracing::info!(book_id = %book.id, title = %book.title, "adding book to library");
        self.books.insert(0, LibraryBook::new(book, Utc::now()));
        self.save();
        true
    }

    /// Remove a book, returning whether it was present
    pub fn remove_book(&mut self, book_id: &str) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.id() != book_id);

        if self.books.len() == before {
            return false;
        }
        self.save();
        true
    }

    /// Copy of the whole collection, newest first
    pub fn books(&self) -> Vec<LibraryBook> {
        self.books.clone()
    }

    pub fn book(&self, book_id: &str) -> Option<&LibraryBook> {
        self.books.iter().find(|b| b.id() == book_id)
    }

    pub fn has_book(&self, book_id: &str) -> bool {
        self.books.iter().any(|b| b.id() == book_id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Merge `updates` into the matching book
    ///
    /// Returns false if no book has this id.
    pub fn update_book(&mut self, book_id: &str, updates: BookUpdate) -> bool {
        let Some(book) = self.books.iter_mut().find(|b| b.id() == book_id) else {
            return false;
        };
        book.apply(updates);
        self.save();
        true
    }

    /// Flag a book as read with full progress
    pub fn mark_as_read(&mut self, book_id: &str) -> bool {
        self.update_book(book_id, BookUpdate::new().is_read(true).reading_progress(100))
    }

    /// Set reading progress, clamped to 0..=100
    pub fn update_progress(&mut self, book_id: &str, progress: i64) -> bool {
        let progress = i64::from(clamp_progress(progress));
        self.update_book(book_id, BookUpdate::new().reading_progress(progress))
    }

    /// Reading-state counts over the collection
    pub fn stats(&self) -> LibraryStats {
        let read = self.books.iter().filter(|b| b.is_read).count();
        let in_progress = self
            .books
            .iter()
            .filter(|b| b.reading_progress > 0 && b.reading_progress < 100)
            .count();

        LibraryStats::new(self.books.len() as i64, read as i64, in_progress as i64)
    }

    /// Books listing `category`, ignoring case, newest first
    pub fn books_in_category(&self, category: &str) -> Vec<LibraryBook> {
        self.books
            .iter()
            .filter(|b| b.book.has_category(category))
            .cloned()
            .collect()
    }

    /// Distinct categories across the library in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for category in self.books.iter().flat_map(|b| &b.book.categories) {
            if !categories.iter().any(|c| c.eq_ignore_ascii_case(category)) {
                categories.push(category.clone());
            }
        }
        categories
    }

    /// Remove every book
    pub fn clear_library(&mut self) {
        self.books.clear();
        self.save();
    }

    fn save(&self) {
        if let Err(e) = save_json(self.store.as_ref(), LIBRARY_KEY, &self.books) {
            tracing::error!(error = %e, "error saving library");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::{MemoryStorage, StorageResult};
    use proptest::prelude::*;

    /// Store whose writes always fail
    struct ReadOnlyStorage;

    impl KeyValueStore for ReadOnlyStorage {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::PermissionDenied(key.to_string()))
        }
    }

    fn library() -> LibraryService {
        LibraryService::open(Arc::new(MemoryStorage::new()))
    }

    fn orwell() -> BookRecord {
        BookRecord::new("A1", "1984").with_authors(["Orwell"])
    }

    #[test]
    fn test_add_then_duplicate() {
        let mut lib = library();

        assert!(lib.add_book(orwell()));
        assert!(!lib.add_book(orwell().with_description("different copy")));

        assert_eq!(lib.len(), 1);
        assert_eq!(lib.book("A1").unwrap().book.description, "");
    }

    #[test]
    fn test_newest_first() {
        let mut lib = library();
        lib.add_book(BookRecord::new("a", "First"));
        lib.add_book(BookRecord::new("b", "Second"));
        lib.add_book(BookRecord::new("c", "Third"));

        let ids: Vec<_> = lib.books().iter().map(|b| b.id().to_string()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_books_is_a_copy() {
        let mut lib = library();
        lib.add_book(orwell());

        let mut copy = lib.books();
        copy[0].notes = "scribbled".to_string();
        copy.clear();

        assert_eq!(lib.len(), 1);
        assert_eq!(lib.book("A1").unwrap().notes, "");
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut lib = library();
        lib.add_book(orwell());
        let before = lib.books();

        assert!(!lib.remove_book("missing"));
        assert!(!lib.update_book("missing", BookUpdate::new().notes("x")));
        assert!(!lib.mark_as_read("missing"));
        assert!(!lib.update_progress("missing", 50));
        assert!(lib.book("missing").is_none());
        assert!(!lib.has_book("missing"));

        assert_eq!(lib.books(), before);
    }

    #[test]
    fn test_remove() {
        let mut lib = library();
        lib.add_book(orwell());

        assert!(lib.remove_book("A1"));
        assert!(!lib.has_book("A1"));
        assert!(lib.is_empty());
    }

    #[test]
    fn test_mark_as_read_forces_full_progress() {
        let mut lib = library();
        lib.add_book(orwell());
        lib.update_progress("A1", 35);

        assert!(lib.mark_as_read("A1"));

        let book = lib.book("A1").unwrap();
        assert!(book.is_read);
        assert_eq!(book.reading_progress, 100);
    }

    #[test]
    fn test_update_book_merges() {
        let mut lib = library();
        lib.add_book(orwell());
        let added = lib.book("A1").unwrap().date_added;

        assert!(lib.update_book(
            "A1",
            BookUpdate::new().notes("chapter 3").reading_progress(140)
        ));

        let book = lib.book("A1").unwrap();
        assert_eq!(book.notes, "chapter 3");
        assert_eq!(book.reading_progress, 100);
        assert_eq!(book.title(), "1984");
        assert_eq!(book.date_added, added);
    }

    #[test]
    fn test_stats() {
        let mut lib = library();
        for id in ["a", "b", "c", "d"] {
            lib.add_book(BookRecord::new(id, id));
        }
        lib.mark_as_read("a");
        lib.update_progress("b", 40);

        assert_eq!(
            lib.stats(),
            LibraryStats {
                total: 4,
                read: 1,
                in_progress: 1,
                unread: 2
            }
        );
    }

    #[test]
    fn test_orwell_scenario() {
        let mut lib = library();
        assert!(lib.add_book(orwell()));

        let books = lib.books();
        assert_eq!(books.len(), 1);
        assert!(!books[0].is_read);
        assert_eq!(books[0].reading_progress, 0);
        assert!(books[0].date_added <= Utc::now());

        assert!(lib.update_progress("A1", 150));
        assert_eq!(lib.book("A1").unwrap().reading_progress, 100);

        // Full progress without the read flag is not in progress, so the
        // derived unread count picks it up
        assert_eq!(
            lib.stats(),
            LibraryStats {
                total: 1,
                read: 0,
                in_progress: 0,
                unread: 1
            }
        );
    }

    #[test]
    fn test_categories() {
        let mut lib = library();
        lib.add_book(BookRecord::new("a", "Emma").with_category("Romance"));
        lib.add_book(
            BookRecord::new("b", "Dune")
                .with_category("Fiction")
                .with_category("romance"),
        );
        lib.add_book(BookRecord::new("c", "Walden"));

        assert_eq!(lib.categories(), vec!["Fiction", "romance"]);

        let romance: Vec<_> = lib
            .books_in_category("ROMANCE")
            .iter()
            .map(|b| b.id().to_string())
            .collect();
        assert_eq!(romance, vec!["b", "a"]);
    }

    #[test]
    fn test_persisted_and_reloaded() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());

        let mut lib = LibraryService::open(store.clone());
        lib.add_book(orwell());
        lib.update_progress("A1", 20);
        lib.add_book(BookRecord::new("B2", "Emma"));

        let reopened = LibraryService::open(store.clone());
        assert_eq!(reopened.books(), lib.books());

        lib.clear_library();
        assert_eq!(store.get(LIBRARY_KEY).unwrap().as_deref(), Some("[]"));
        assert!(LibraryService::open(store).is_empty());
    }

    #[test]
    fn test_corrupt_library_loads_empty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        store.set(LIBRARY_KEY, r#"[{"id": 7}]"#).unwrap();

        assert!(LibraryService::open(store).is_empty());
    }

    #[test]
    fn test_stored_progress_clamped_on_load() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        store
            .set(
                LIBRARY_KEY,
                r#"[{"id": "A1", "title": "1984", "authors": ["Orwell"],
                     "dateAdded": "2024-03-01T10:00:00Z", "readingProgress": 180}]"#,
            )
            .unwrap();

        let lib = LibraryService::open(store);
        let book = lib.book("A1").unwrap();
        assert_eq!(book.reading_progress, 100);
        assert_eq!(book.book.language, "en");
        assert!(!book.is_read);
    }

    #[test]
    fn test_out_of_range_progress_keeps_whole_library() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        store
            .set(
                LIBRARY_KEY,
                r#"[{"id": "A1", "title": "1984", "authors": ["Orwell"],
                     "dateAdded": "2024-03-01T10:00:00Z", "readingProgress": 300},
                    {"id": "B2", "title": "Emma", "authors": ["Austen"],
                     "dateAdded": "2024-03-02T10:00:00Z", "readingProgress": -5},
                    {"id": "C3", "title": "Walden", "authors": ["Thoreau"],
                     "dateAdded": "2024-03-03T10:00:00Z", "readingProgress": 10}]"#,
            )
            .unwrap();

        let mut lib = LibraryService::open(store.clone());
        assert_eq!(lib.len(), 3);
        assert_eq!(lib.book("A1").unwrap().reading_progress, 100);
        assert_eq!(lib.book("B2").unwrap().reading_progress, 0);
        assert_eq!(lib.book("C3").unwrap().reading_progress, 10);

        // A later write keeps every book
        lib.add_book(BookRecord::new("D4", "Dune"));
        assert_eq!(LibraryService::open(store).len(), 4);
    }

    #[test]
    fn test_failed_writes_keep_memory_state() {
        let mut lib = LibraryService::open(Arc::new(ReadOnlyStorage));

        assert!(lib.add_book(orwell()));
        assert!(lib.mark_as_read("A1"));

        assert_eq!(lib.len(), 1);
        assert!(lib.book("A1").unwrap().is_read);
    }

    proptest! {
        #[test]
        fn prop_progress_clamped(p in any::<i64>()) {
            let mut lib = library();
            lib.add_book(orwell());
            lib.update_progress("A1", p);
            prop_assert_eq!(i64::from(lib.book("A1").unwrap().reading_progress), p.clamp(0, 100));
        }

        #[test]
        fn prop_stats_add_up(ops in proptest::collection::vec((0u8..4, 0usize..5, -50i64..150), 0..30)) {
            let mut lib = library();
            for (op, slot, value) in ops {
                let id = format!("book-{}", slot);
                match op {
                    0 => { lib.add_book(BookRecord::new(id.clone(), id)); }
                    1 => { lib.update_progress(&id, value); }
                    2 => { lib.update_book(&id, BookUpdate::new().is_read(value % 2 == 0)); }
                    _ => { lib.remove_book(&id); }
                }
                let stats = lib.stats();
                prop_assert_eq!(stats.total, stats.read + stats.in_progress + stats.unread);
                prop_assert_eq!(stats.total, lib.len() as i64);
            }
        }
    }
}
