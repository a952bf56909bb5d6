//! Core types shared by the search and library services

mod book;
mod library_book;
mod stats;

pub use book::{BookRecord, DEFAULT_AUTHOR, DEFAULT_LANGUAGE, DEFAULT_TITLE};
pub use library_book::{clamp_progress, BookUpdate, LibraryBook};
pub use stats::LibraryStats;
