// src/services/resolver.rs

//! Bulletin resolver.
//!
//! Fetches a source's listing page, picks the newest dated entry, follows the
//! detail page when the source has one, and hands the result to the
//! assembler.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::events::{BulletinEvent, EventSink};
use crate::models::{BulletinRecord, DetailSelectors, SourceConfig};
use crate::services::assembler::BulletinAssembler;
use crate::services::detail::find_language_link;
use crate::services::listing::{parse_listing, select_latest};
use crate::utils::http::{Fetcher, fetch_page};

/// Anything that can produce the freshest bulletin for one source.
#[async_trait]
pub trait Resolver: Send + Sync {
    fn source_name(&self) -> &str;

    async fn resolve_bulletin(&self) -> Result<BulletinRecord>;
}

/// Resolver driven entirely by a [`SourceConfig`].
pub struct SourceResolver<'a> {
    source: &'a SourceConfig,
    timeout: Option<Duration>,
    fetcher: &'a dyn Fetcher,
    assembler: BulletinAssembler<'a>,
    sink: &'a dyn EventSink,
}

impl<'a> SourceResolver<'a> {
    pub fn new(
        source: &'a SourceConfig,
        timeout: Option<Duration>,
        fetcher: &'a dyn Fetcher,
        assembler: BulletinAssembler<'a>,
        sink: &'a dyn EventSink,
    ) -> Self {
        Self {
            source,
            timeout,
            fetcher,
            assembler,
            sink,
        }
    }

    /// Follow a detail page to the PDF for the preferred language.
    ///
    /// A detail page without its content block is reported as a connection
    /// failure: the sites serve truncated pages when the connection drops,
    /// so a rerun is the usual remedy.
    async fn resolve_detail(
        &self,
        detail: &DetailSelectors,
        page_url: &str,
    ) -> Result<Option<String>> {
        let html = fetch_page(self.fetcher, page_url, self.timeout).await?;
        match find_language_link(&self.source.name, detail, page_url, &html) {
            Err(AppError::PageStructureChanged { message, .. }) => {
                self.sink.emit(BulletinEvent::DetailStructureChanged {
                    source: self.source.name.clone(),
                    url: page_url.to_string(),
                });
                Err(AppError::connection(
                    page_url,
                    format!("detail page incomplete ({message}), rerun"),
                ))
            }
            other => other,
        }
    }
}

#[async_trait]
impl Resolver for SourceResolver<'_> {
    fn source_name(&self) -> &str {
        &self.source.name
    }

    async fn resolve_bulletin(&self) -> Result<BulletinRecord> {
        let name = &self.source.name;
        log::debug!("[{}] fetching listing {}", name, self.source.listing_url);

        let html = fetch_page(self.fetcher, &self.source.listing_url, self.timeout).await?;
        let entries = parse_listing(self.source, &html)?;
        self.sink.emit(BulletinEvent::ListingParsed {
            source: name.clone(),
            entries: entries.len(),
        });

        let Some(latest) = select_latest(&entries).cloned() else {
            self.sink.emit(BulletinEvent::NothingFound {
                source: name.clone(),
            });
            return self.assembler.assemble(name, None, None, self.timeout).await;
        };

        let link = match (&self.source.detail, latest.link) {
            (Some(detail), Some(page_url)) => self.resolve_detail(detail, &page_url).await?,
            (Some(_), None) => None,
            (None, link) => link,
        };

        self.sink.emit(BulletinEvent::LatestSelected {
            source: name.clone(),
            date: latest.date,
            link: link.clone(),
        });

        self.assembler
            .assemble(name, Some(latest.date), link, self.timeout)
            .await
    }
}
