//! CLI command implementations

mod library;
mod search;
mod stats;

pub use library::{clear, list, mark_read, note, progress, remove, show};
pub use search::{add, recent, search};
pub use stats::stats;

use anyhow::{Context as _, Result};
use nook_core::{
    CatalogSearchService, GoogleBooksClient, KeyValueStore, LibraryService, LocalStorage,
    NookConfig,
};
use std::sync::Arc;

/// Services wired to on-disk storage, shared by every command
pub struct Context {
    config: NookConfig,
    store: Arc<dyn KeyValueStore>,
}

impl Context {
    pub fn new(config: NookConfig) -> Result<Self> {
        config.ensure_data_dir().with_context(|| {
            format!(
                "Failed to create data directory: {}",
                config.data_dir.display()
            )
        })?;
        let store = Arc::new(LocalStorage::new(&config.data_dir));

        tracing::debug!(data_dir = %config.data_dir.display(), "using local storage");
        Ok(Self { config, store })
    }

    pub fn library(&self) -> LibraryService {
        LibraryService::open(self.store.clone())
    }

    pub fn search_service(&self) -> Result<CatalogSearchService<GoogleBooksClient>> {
        let client =
            GoogleBooksClient::from_config(&self.config).context("Failed to build catalog client")?;
        Ok(CatalogSearchService::open(client, self.store.clone()))
    }
}
