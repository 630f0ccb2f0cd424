// src/models/source.rs

//! Per-source scraping configuration.

use std::time::Duration;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Everything needed to scrape one state's bulletin listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    /// Source name, also used as the cache file prefix
    pub name: String,

    /// URL of the page enumerating bulletins
    pub listing_url: String,

    /// Selectors for the listing page
    pub listing: ListingSelectors,

    /// How the raw date substring is cut out of an entry's text
    pub date_rule: DateRule,

    /// chrono formats tried in order; the first that parses wins
    pub date_formats: Vec<String>,

    /// Month-token corrections applied when no format matches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub month_corrections: Vec<Replacement>,

    /// Detail page selectors, for listings that do not link PDFs directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailSelectors>,

    /// Request timeout for every fetch made for this source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl SourceConfig {
    /// Per-source timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Check that every selector parses and the date rule is usable.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("source name is empty"));
        }
        url::Url::parse(&self.listing_url)?;

        self.listing.compile()?;
        if let Some(detail) = &self.detail {
            detail.compile()?;
            if detail.languages.is_empty() {
                return Err(AppError::validation(format!(
                    "{}: detail.languages must not be empty",
                    self.name
                )));
            }
        }
        if self.date_formats.is_empty() {
            return Err(AppError::validation(format!(
                "{}: no date formats configured",
                self.name
            )));
        }
        if let DateRule::Labelled { label, .. } | DateRule::LabelledTokens { label, .. } =
            &self.date_rule
        {
            if label.is_empty() {
                return Err(AppError::validation(format!(
                    "{}: date label is empty",
                    self.name
                )));
            }
        }
        if self.timeout_secs == Some(0) {
            return Err(AppError::validation(format!(
                "{}: timeout_secs must be > 0",
                self.name
            )));
        }
        Ok(())
    }
}

/// CSS selectors for the listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingSelectors {
    /// Block that holds the entries; the whole document when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    /// Pick the first container whose text contains this marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_marker: Option<String>,

    /// Selector for each bulletin entry
    pub entry: String,

    /// Selector for the anchor inside an entry
    #[serde(default = "default_link")]
    pub link: String,
}

/// Parsed form of [`ListingSelectors`].
#[derive(Debug)]
pub struct CompiledListing {
    pub container: Option<Selector>,
    pub entry: Selector,
    pub link: Selector,
}

impl ListingSelectors {
    pub fn compile(&self) -> Result<CompiledListing> {
        Ok(CompiledListing {
            container: self.container.as_deref().map(parse_selector).transpose()?,
            entry: parse_selector(&self.entry)?,
            link: parse_selector(&self.link)?,
        })
    }
}

/// CSS selectors for a bulletin detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetailSelectors {
    /// Block holding the per-language links
    pub content: String,

    /// Items scanned for a language marker
    pub item: String,

    /// Language markers in order of preference
    pub languages: Vec<String>,
}

/// Parsed form of [`DetailSelectors`].
#[derive(Debug)]
pub struct CompiledDetail {
    pub content: Selector,
    pub item: Selector,
    pub anchor: Selector,
}

impl DetailSelectors {
    pub fn compile(&self) -> Result<CompiledDetail> {
        Ok(CompiledDetail {
            content: parse_selector(&self.content)?,
            item: parse_selector(&self.item)?,
            anchor: parse_selector("a[href]")?,
        })
    }
}

/// How the raw date text is extracted from an entry's anchor text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateRule {
    /// Two-digit day, two-digit month and four-digit year at fixed
    /// character offsets, e.g. `05/04/2020`.
    Offsets {
        day: usize,
        month: usize,
        year: usize,
    },

    /// Text following `label`: the match is `label` plus everything after it,
    /// `skip` characters are dropped from its start and every separator is
    /// turned into a space.
    Labelled {
        label: String,
        skip: usize,
        #[serde(default)]
        separators: Vec<String>,
    },

    /// Like `Labelled`, then non-ASCII characters are stripped, commas are
    /// treated as spaces, only the last three tokens are kept and the day
    /// token loses any non-digit characters (`5th` becomes `5`).
    LabelledTokens { label: String, skip: usize },
}

/// A text replacement rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

fn default_link() -> String {
    "a".to_string()
}

/// Parse a CSS selector, keeping the offending text in the error.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
