// src/pipeline/fetch.rs

//! Bulletin fetching pipeline.

use std::time::Instant;

use serde::Serialize;

use crate::error::Result;
use crate::models::{BulletinRecord, SourceConfig};
use crate::services::{BulletinService, Resolver};

/// A source that could not be resolved during a `keep_going` run.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFailure {
    pub source: String,
    pub error: String,
}

/// Result of a fetch run.
#[derive(Debug, Default, Serialize)]
pub struct FetchReport {
    pub records: Vec<BulletinRecord>,
    pub failures: Vec<SourceFailure>,
}

impl FetchReport {
    pub fn updated_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_updated()).count()
    }
}

/// Resolve the named sources one after another (all sources when `names`
/// is empty).
///
/// Without `keep_going` the first failure aborts the run, matching the
/// behavior of resolving each state directly.
pub async fn run_fetch(
    service: &BulletinService,
    names: &[String],
    keep_going: bool,
) -> Result<FetchReport> {
    let sources = select_sources(service, names)?;
    let started = Instant::now();
    log::info!("Fetching bulletins for {} source(s)", sources.len());

    let mut report = FetchReport::default();
    for source in sources {
        let resolver = service.resolver(source);
        match resolver.resolve_bulletin().await {
            Ok(record) => {
                log::debug!("{}", record.summary());
                report.records.push(record);
            }
            Err(e) if keep_going => {
                log::error!("[{}] {}", resolver.source_name(), e);
                report.failures.push(SourceFailure {
                    source: resolver.source_name().to_string(),
                    error: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "Fetched {} bulletin(s), {} updated, {} failed in {:.1}s",
        report.records.len(),
        report.updated_count(),
        report.failures.len(),
        started.elapsed().as_secs_f64()
    );
    Ok(report)
}

fn select_sources<'a>(
    service: &'a BulletinService,
    names: &[String],
) -> Result<Vec<&'a SourceConfig>> {
    if names.is_empty() {
        return Ok(service.config().sources.iter().collect());
    }
    names.iter().map(|name| service.config().source(name)).collect()
}
