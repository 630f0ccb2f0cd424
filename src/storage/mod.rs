//! Storage abstractions for cached bulletins.
//!
//! Every bulletin is kept as a PDF named after its source and release date:
//!
//! ```text
//! resources/
//! ├── Kerala-14-04-2020.pdf
//! ├── Kerala-15-04-2020.pdf
//! └── Delhi-15-04-2020.pdf
//! ```
//!
//! Files for older dates are never removed, so the directory grows by one
//! file per source per new bulletin.

pub mod local;

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate};

use crate::error::Result;
use crate::utils::http::Fetcher;

// Re-export for convenience
pub use local::BulletinCache;

/// Date format used in cache file names.
pub const CACHE_DATE_FORMAT: &str = "%d-%m-%Y";

/// A bulletin PDF already present in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedBulletin {
    pub source: String,
    pub date: NaiveDate,
    pub path: PathBuf,
}

/// Trait for bulletin cache backends.
#[async_trait]
pub trait BulletinStore: Send + Sync {
    /// Deterministic location of the cached copy for `(source, date)`.
    fn cache_path(&self, source: &str, date: NaiveDate) -> PathBuf;

    /// Fetch `url` and bring the cached copy at `path` up to date.
    ///
    /// Returns the update time when the file was created or replaced and
    /// `None` when the cached bytes already matched.
    async fn reconcile(
        &self,
        fetcher: &dyn Fetcher,
        url: &str,
        path: &Path,
        timeout: Option<Duration>,
    ) -> Result<Option<DateTime<Local>>>;
}
