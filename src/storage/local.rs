//! Local filesystem bulletin cache.
//!
//! Detects remote changes by comparing freshly downloaded bytes with the
//! cached file. Replacements go through a uniquely named temporary file in
//! the same directory followed by a rename, so a reader never sees a partial
//! PDF and nothing is left behind on any path.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate};
use tokio::sync::Mutex as AsyncMutex;

use crate::error::{AppError, Result};
use crate::storage::{BulletinStore, CACHE_DATE_FORMAT, CachedBulletin};
use crate::utils::http::Fetcher;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct BulletinCache {
    root_dir: PathBuf,
    locks: Arc<Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>>,
}

impl BulletinCache {
    /// Create a new cache rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Create the cache directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root_dir).await?;
        Ok(())
    }

    /// Cached bulletins of one source, oldest first.
    pub fn list_cached(&self, source: &str) -> Result<Vec<CachedBulletin>> {
        let prefix = format!("{source}-");
        let entries = match fs::read_dir(&self.root_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Io(e)),
        };

        let mut cached = Vec::new();
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(date_part) = name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(".pdf"))
            else {
                continue;
            };
            if let Ok(date) = NaiveDate::parse_from_str(date_part, CACHE_DATE_FORMAT) {
                cached.push(CachedBulletin {
                    source: source.to_string(),
                    date,
                    path: entry.path(),
                });
            }
        }
        cached.sort_by_key(|c| c.date);
        Ok(cached)
    }

    /// Per-path lock so concurrent reconciliations of one file serialise.
    fn lock_for(&self, path: &Path) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(path.to_path_buf()).or_default())
    }

    async fn fetch_and_store(
        fetcher: &dyn Fetcher,
        url: &str,
        path: &Path,
        timeout: Option<Duration>,
    ) -> Result<Option<DateTime<Local>>> {
        let bytes = fetcher.fetch(url, timeout).await?;
        let target = path.to_path_buf();
        let changed = tokio::task::spawn_blocking(move || store_if_changed(&target, &bytes))
            .await
            .map_err(io::Error::other)??;

        if changed {
            log::debug!("Stored {} from {}", path.display(), url);
            Ok(Some(Local::now()))
        } else {
            log::debug!("{} unchanged", path.display());
            Ok(None)
        }
    }

    /// Drop the lock entry for `path` once no other reconciliation holds it.
    fn release_lock(&self, path: &Path, lock: Arc<AsyncMutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(lock);
        if locks.get(path).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(path);
        }
    }
}

#[async_trait]
impl BulletinStore for BulletinCache {
    fn cache_path(&self, source: &str, date: NaiveDate) -> PathBuf {
        self.root_dir
            .join(format!("{}-{}.pdf", source, date.format(CACHE_DATE_FORMAT)))
    }

    async fn reconcile(
        &self,
        fetcher: &dyn Fetcher,
        url: &str,
        path: &Path,
        timeout: Option<Duration>,
    ) -> Result<Option<DateTime<Local>>> {
        let lock = self.lock_for(path);
        let result = {
            let _guard = lock.lock().await;
            Self::fetch_and_store(fetcher, url, path, timeout).await
        };
        self.release_lock(path, lock);
        result
    }
}

/// Write `bytes` to `path` unless the file already holds exactly them.
fn store_if_changed(path: &Path, bytes: &[u8]) -> io::Result<bool> {
    match fs::read(path) {
        Ok(existing) if existing == bytes => return Ok(false),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = tempfile::Builder::new()
        .prefix(".bulletin-")
        .suffix(".part")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(true)
}
