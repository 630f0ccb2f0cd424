//! Tamil Nadu Health & Family Welfare Department.
//!
//! The server is slow enough that requests get an explicit timeout.

use crate::models::{DateRule, ListingSelectors, SourceConfig};

use super::{TAMIL_NADU, word_then_numeric_formats};

const LISTING_URL: &str = "https://stopcorona.tn.gov.in/daily-bulletin/";

pub fn source() -> SourceConfig {
    SourceConfig {
        name: TAMIL_NADU.to_string(),
        listing_url: LISTING_URL.to_string(),
        listing: ListingSelectors {
            container: Some("div.entry-content".to_string()),
            container_marker: None,
            entry: "li".to_string(),
            link: "a".to_string(),
        },
        date_rule: DateRule::Labelled {
            label: "Bulletin".to_string(),
            skip: 9,
            separators: vec![".".to_string()],
        },
        date_formats: word_then_numeric_formats(),
        month_corrections: Vec::new(),
        detail: None,
        timeout_secs: Some(60),
    }
}
