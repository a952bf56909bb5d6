//! Nook Core Library
//!
//! The data layer of a personal reading library: a catalog search service
//! that normalizes, caches and remembers searches, and a library service that
//! owns the user's persisted book collection. Both persist through a
//! [`storage::KeyValueStore`] and never surface errors to their callers.

pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod search;
pub mod storage;
pub mod types;

pub use catalog::{CatalogClient, GoogleBooksClient};
pub use config::NookConfig;
pub use error::{CatalogError, NookError, Result, StorageError};
pub use library::LibraryService;
pub use search::CatalogSearchService;
pub use storage::{KeyValueStore, LocalStorage, MemoryStorage};
pub use types::{BookRecord, BookUpdate, LibraryBook, LibraryStats};
