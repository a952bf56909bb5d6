//! The canonical book record produced by catalog searches

use serde::{Deserialize, Serialize};

/// Title used when the catalog omits one
pub const DEFAULT_TITLE: &str = "Unknown Title";

/// Author used when the catalog lists none
pub const DEFAULT_AUTHOR: &str = "Unknown Author";

/// Language used when the catalog omits one
pub const DEFAULT_LANGUAGE: &str = "en";

/// A normalized catalog search result
///
/// Every field is filled in: absent catalog data is replaced by the defaults
/// above, zero, or an empty string/list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Stable external identifier, unique key for all lookups
    pub id: String,

    pub title: String,

    /// Authors in catalog order
    pub authors: Vec<String>,

    #[serde(default)]
    pub description: String,

    /// Free-form publication date as given by the catalog
    #[serde(default)]
    pub published_date: String,

    #[serde(default)]
    pub page_count: u32,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default = "default_language")]
    pub language: String,

    /// Cover image URL
    #[serde(default)]
    pub thumbnail: String,

    #[serde(default)]
    pub preview_link: String,

    #[serde(default)]
    pub info_link: String,

    /// Average rating in [0, 5]
    #[serde(default)]
    pub average_rating: f64,

    #[serde(default)]
    pub ratings_count: u32,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl BookRecord {
    /// Create a record with the given id and title, everything else defaulted
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors: vec![DEFAULT_AUTHOR.to_string()],
            description: String::new(),
            published_date: String::new(),
            page_count: 0,
            categories: Vec::new(),
            language: default_language(),
            thumbnail: String::new(),
            preview_link: String::new(),
            info_link: String::new(),
            average_rating: 0.0,
            ratings_count: 0,
        }
    }

    /// Replace the author list
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        if self.authors.is_empty() {
            self.authors.push(DEFAULT_AUTHOR.to_string());
        }
        self
    }

    /// Add a category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set page count
    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = page_count;
        self
    }

    /// Whether the record lists `category`, ignoring case
    pub fn has_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}
