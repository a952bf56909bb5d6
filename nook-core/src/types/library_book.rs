//! Library entries: a book record plus the reader's own state

use super::BookRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Clamp a progress value into the 0..=100 percent range
pub fn clamp_progress(progress: i64) -> u8 {
    // Lossless: the value is within 0..=100 after clamping
    progress.clamp(0, 100) as u8
}

/// Accept any stored number (negative, fractional, oversized) and clamp it
fn deserialize_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw
        .filter(|p| p.is_finite())
        .map(|p| clamp_progress(p.round() as i64))
        .unwrap_or(0))
}

/// A book the user has added to their library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBook {
    /// Catalog metadata, flattened so stored documents keep a single level
    #[serde(flatten)]
    pub book: BookRecord,

    /// When the book was added; never changes afterwards
    pub date_added: DateTime<Utc>,

    #[serde(default)]
    pub is_read: bool,

    /// Percent read, always within 0..=100
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub reading_progress: u8,

    #[serde(default)]
    pub notes: String,
}

impl LibraryBook {
    /// Wrap a catalog record with fresh reader state
    pub fn new(book: BookRecord, date_added: DateTime<Utc>) -> Self {
        Self {
            book,
            date_added,
            is_read: false,
            reading_progress: 0,
            notes: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.book.id
    }

    pub fn title(&self) -> &str {
        &self.book.title
    }

    /// Shallow-merge `update` into this entry
    ///
    /// Only fields set on the update are touched. Progress is clamped.
    pub fn apply(&mut self, update: BookUpdate) {
        let BookUpdate {
            title,
            authors,
            description,
            published_date,
            page_count,
            categories,
            language,
            thumbnail,
            preview_link,
            info_link,
            average_rating,
            ratings_count,
            is_read,
            reading_progress,
            notes,
        } = update;

        let book = &mut self.book;
        if let Some(v) = title {
            book.title = v;
        }
        if let Some(v) = authors {
            book.authors = v;
        }
        if let Some(v) = description {
            book.description = v;
        }
        if let Some(v) = published_date {
            book.published_date = v;
        }
        if let Some(v) = page_count {
            book.page_count = v;
        }
        if let Some(v) = categories {
            book.categories = v;
        }
        if let Some(v) = language {
            book.language = v;
        }
        if let Some(v) = thumbnail {
            book.thumbnail = v;
        }
        if let Some(v) = preview_link {
            book.preview_link = v;
        }
        if let Some(v) = info_link {
            book.info_link = v;
        }
        if let Some(v) = average_rating {
            book.average_rating = v.clamp(0.0, 5.0);
        }
        if let Some(v) = ratings_count {
            book.ratings_count = v;
        }
        if let Some(v) = is_read {
            self.is_read = v;
        }
        if let Some(v) = reading_progress {
            self.reading_progress = clamp_progress(v);
        }
        if let Some(v) = notes {
            self.notes = v;
        }
    }
}

/// A partial library entry: every `Some` field replaces the stored value
///
/// The id and the date added are deliberately absent, neither can be
/// rewritten after insertion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
    pub categories: Option<Vec<String>>,
    pub language: Option<String>,
    pub thumbnail: Option<String>,
    pub preview_link: Option<String>,
    pub info_link: Option<String>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<u32>,
    pub is_read: Option<bool>,
    /// Unclamped; values outside 0..=100 are clamped when applied
    pub reading_progress: Option<i64>,
    pub notes: Option<String>,
}

impl BookUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_read(mut self, is_read: bool) -> Self {
        self.is_read = Some(is_read);
        self
    }

    pub fn reading_progress(mut self, progress: i64) -> Self {
        self.reading_progress = Some(progress);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
