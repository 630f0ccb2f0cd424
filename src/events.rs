// src/events.rs

//! Progress events emitted while resolving bulletins.
//!
//! Resolvers never print; they hand [`BulletinEvent`]s to an [`EventSink`]
//! supplied by the caller.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;

/// Something observable happened while resolving a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulletinEvent {
    /// Listing page fetched and parsed.
    ListingParsed { source: String, entries: usize },
    /// A detail page lacked its content block.
    DetailStructureChanged { source: String, url: String },
    /// Newest entry chosen; `link` is `None` when it had no usable PDF.
    LatestSelected {
        source: String,
        date: NaiveDate,
        link: Option<String>,
    },
    /// No entry was newer than the sentinel date.
    NothingFound { source: String },
    /// Cache file written because it was missing or stale.
    CacheUpdated { source: String, path: PathBuf },
    /// Cache file already matched the remote bulletin.
    CacheCurrent { source: String, path: PathBuf },
}

/// Receiver of progress events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: BulletinEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: BulletinEvent) {
        match event {
            BulletinEvent::ListingParsed { source, entries } => {
                log::debug!("[{source}] listing has {entries} entries");
            }
            BulletinEvent::DetailStructureChanged { source, url } => {
                log::warn!("[{source}] detail page {url} is missing its content block");
            }
            BulletinEvent::LatestSelected { source, date, link } => match link {
                Some(link) => log::info!("[{source}] latest bulletin {date}: {link}"),
                None => log::warn!("[{source}] latest entry {date} has no bulletin link"),
            },
            BulletinEvent::NothingFound { source } => {
                log::warn!("[{source}] no dated bulletin found");
            }
            BulletinEvent::CacheUpdated { source, path } => {
                log::info!("[{source}] cached copy updated at {}", path.display());
            }
            BulletinEvent::CacheCurrent { source, path } => {
                log::info!("[{source}] cached copy {} is current", path.display());
            }
        }
    }
}

/// Keeps events in memory, mostly for tests and callers that want a report.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<BulletinEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<BulletinEvent> {
        match self.events.lock() {
            Ok(mut events) => events.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: BulletinEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
