//! External book catalog access
//!
//! [`CatalogClient`] is the seam between the search service and the network:
//! the service only ever sees a decoded [`VolumesResponse`] or a
//! [`CatalogError`].

mod google;
mod volume;

pub use google::{GoogleBooksClient, GOOGLE_BOOKS_API_BASE};
pub use volume::{ImageLinks, Volume, VolumeInfo, VolumesResponse};

use crate::error::CatalogError;
use async_trait::async_trait;

/// Result type for catalog requests
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Upper bound the catalog accepts for one page of results
pub const MAX_RESULTS_LIMIT: u32 = 40;

/// A searchable book catalog
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Run one search request, returning at most `max_results` volumes
    async fn search_volumes(&self, query: &str, max_results: u32)
        -> CatalogResult<VolumesResponse>;
}
