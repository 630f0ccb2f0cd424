// src/services/bulletins.rs

//! Bulletin service.
//!
//! Owns the shared pieces (configuration, fetcher, cache, event sink) and
//! hands out one resolver per source.

use std::sync::Arc;

use crate::error::Result;
use crate::events::{EventSink, LogSink};
use crate::models::{BulletinRecord, Config, SourceConfig};
use crate::services::assembler::BulletinAssembler;
use crate::services::resolver::{Resolver, SourceResolver};
use crate::sources;
use crate::storage::{BulletinCache, BulletinStore};
use crate::utils::http::{Fetcher, HttpFetcher};

/// Entry point for resolving the latest bulletin of each state.
#[derive(Clone)]
pub struct BulletinService {
    config: Arc<Config>,
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn BulletinStore>,
    sink: Arc<dyn EventSink>,
}

impl BulletinService {
    pub fn new(
        config: Arc<Config>,
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn BulletinStore>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            config,
            fetcher,
            store,
            sink,
        }
    }

    /// Build the default stack: reqwest fetcher, on-disk cache under the
    /// configured resources directory, events forwarded to the log.
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        let store = BulletinCache::new(config.storage.resources_path());
        Ok(Self::new(
            config,
            Arc::new(fetcher),
            Arc::new(store),
            Arc::new(LogSink),
        ))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolver for one source, borrowing the service's shared pieces.
    pub fn resolver<'a>(&'a self, source: &'a SourceConfig) -> SourceResolver<'a> {
        let assembler = BulletinAssembler::new(&*self.store, &*self.fetcher, &*self.sink);
        SourceResolver::new(
            source,
            self.config.timeout_for(source),
            &*self.fetcher,
            assembler,
            &*self.sink,
        )
    }

    /// Resolve the latest bulletin for `source`.
    pub async fn resolve(&self, source: &SourceConfig) -> Result<BulletinRecord> {
        self.resolver(source).resolve_bulletin().await
    }

    /// Resolve a configured source by name (case-insensitive).
    pub async fn resolve_named(&self, name: &str) -> Result<BulletinRecord> {
        let source = self.config.source(name)?;
        self.resolve(source).await
    }

    pub async fn kerala(&self) -> Result<BulletinRecord> {
        self.resolve_named(sources::KERALA).await
    }

    pub async fn delhi(&self) -> Result<BulletinRecord> {
        self.resolve_named(sources::DELHI).await
    }

    pub async fn telangana(&self) -> Result<BulletinRecord> {
        self.resolve_named(sources::TELANGANA).await
    }

    pub async fn andhra_pradesh(&self) -> Result<BulletinRecord> {
        self.resolve_named(sources::ANDHRA_PRADESH).await
    }

    pub async fn tamil_nadu(&self) -> Result<BulletinRecord> {
        self.resolve_named(sources::TAMIL_NADU).await
    }
}
