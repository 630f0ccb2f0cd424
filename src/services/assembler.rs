// src/services/assembler.rs

//! Turns a resolved (date, link) pair into a [`BulletinRecord`].

use std::time::Duration;

use chrono::NaiveDate;

use crate::error::Result;
use crate::events::{BulletinEvent, EventSink};
use crate::models::{BulletinRecord, sentinel_date};
use crate::storage::BulletinStore;
use crate::utils::http::Fetcher;

/// Builds the cache path, runs change detection and wraps the result.
pub struct BulletinAssembler<'a> {
    store: &'a dyn BulletinStore,
    fetcher: &'a dyn Fetcher,
    sink: &'a dyn EventSink,
}

impl<'a> BulletinAssembler<'a> {
    pub fn new(
        store: &'a dyn BulletinStore,
        fetcher: &'a dyn Fetcher,
        sink: &'a dyn EventSink,
    ) -> Self {
        Self {
            store,
            fetcher,
            sink,
        }
    }

    /// Without a link there is nothing to download, so the cache is not
    /// touched and `last_updated` stays empty.
    pub async fn assemble(
        &self,
        source: &str,
        release_date: Option<NaiveDate>,
        pdf_link: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<BulletinRecord> {
        let last_updated = match &pdf_link {
            Some(link) => {
                let date = release_date.unwrap_or_else(sentinel_date);
                let path = self.store.cache_path(source, date);
                let updated = self
                    .store
                    .reconcile(self.fetcher, link, &path, timeout)
                    .await?;

                let event = if updated.is_some() {
                    BulletinEvent::CacheUpdated {
                        source: source.to_string(),
                        path,
                    }
                } else {
                    BulletinEvent::CacheCurrent {
                        source: source.to_string(),
                        path,
                    }
                };
                self.sink.emit(event);
                updated
            }
            None => None,
        };

        Ok(BulletinRecord {
            source: source.to_string(),
            release_date,
            pdf_link,
            last_updated,
        })
    }
}
