//! Telangana COVID-19 portal.
//!
//! Headings look like `Media Bulletin - 5th April, 2020`, sometimes with
//! stray non-ASCII characters around the day.

use crate::models::{DateRule, ListingSelectors, SourceConfig};

use super::{TELANGANA, word_then_numeric_formats};

const LISTING_URL: &str = "https://covid19.telangana.gov.in/announcements/media-bulletins/";

pub fn source() -> SourceConfig {
    SourceConfig {
        name: TELANGANA.to_string(),
        listing_url: LISTING_URL.to_string(),
        listing: ListingSelectors {
            container: Some("div.ast-row".to_string()),
            container_marker: None,
            entry: "h2.entry-title".to_string(),
            link: "a".to_string(),
        },
        date_rule: DateRule::LabelledTokens {
            label: "Bulletin".to_string(),
            skip: 11,
        },
        date_formats: word_then_numeric_formats(),
        month_corrections: Vec::new(),
        detail: None,
        timeout_secs: None,
    }
}
