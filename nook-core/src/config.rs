//! Runtime configuration resolved from the environment

use crate::catalog::GOOGLE_BOOKS_API_BASE;
use crate::error::Result;
use std::path::PathBuf;
use std::time::Duration;

/// Default directory for persisted state
pub const DEFAULT_DATA_DIR: &str = "./nook_data";

/// Default catalog request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NookConfig {
    /// Directory holding the persisted library and search history
    pub data_dir: PathBuf,

    /// Catalog volumes endpoint
    pub catalog_url: String,

    /// Timeout applied to each catalog request
    pub http_timeout: Duration,
}

impl Default for NookConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_url: GOOGLE_BOOKS_API_BASE.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl NookConfig {
    /// Read `NOOK_DATA_DIR`, `NOOK_CATALOG_URL` and `NOOK_HTTP_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup
    ///
    /// Unset, blank or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            data_dir: var("NOOK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            catalog_url: var("NOOK_CATALOG_URL").unwrap_or(defaults.catalog_url),
            http_timeout: var("NOOK_HTTP_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
        }
    }

    /// Create the data directory if it does not exist yet
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Override the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = NookConfig::from_lookup(lookup(&[]));
        assert_eq!(config, NookConfig::default());
        assert_eq!(config.catalog_url, GOOGLE_BOOKS_API_BASE);
    }

    #[test]
    fn test_overrides() {
        let config = NookConfig::from_lookup(lookup(&[
            ("NOOK_DATA_DIR", "/tmp/shelf"),
            ("NOOK_CATALOG_URL", "http://localhost:8080/volumes"),
            ("NOOK_HTTP_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/shelf"));
        assert_eq!(config.catalog_url, "http://localhost:8080/volumes");
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = NookConfig::from_lookup(lookup(&[
            ("NOOK_DATA_DIR", "  "),
            ("NOOK_HTTP_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(
            config.http_timeout,
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)
        );

        let zero = NookConfig::from_lookup(lookup(&[("NOOK_HTTP_TIMEOUT_SECS", "0")]));
        assert_eq!(zero.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
    }

    #[test]
    fn test_ensure_data_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = NookConfig::default().with_data_dir(dir.path().join("nested/data"));
        config.ensure_data_dir().unwrap();
        assert!(config.data_dir.is_dir());
    }
}
