//! Andhra Pradesh Health, Medical & Family Welfare Department.
//!
//! The page has several panels; the bulletin list is the one mentioning
//! "Bulletin". Entries link to a page offering English and Telugu PDFs.
//! Some entries carry the month as `30` where `03` was meant, which is
//! patched before giving up on the date.

use crate::models::{DateRule, DetailSelectors, ListingSelectors, Replacement, SourceConfig};

use super::{ANDHRA_PRADESH, word_then_numeric_formats};

const LISTING_URL: &str = "http://hmfw.ap.gov.in/covid_19_dailybulletins.aspx";

pub fn source() -> SourceConfig {
    SourceConfig {
        name: ANDHRA_PRADESH.to_string(),
        listing_url: LISTING_URL.to_string(),
        listing: ListingSelectors {
            container: Some("div.panel".to_string()),
            container_marker: Some("Bulletin".to_string()),
            entry: "li".to_string(),
            link: "a".to_string(),
        },
        date_rule: DateRule::Labelled {
            label: "Bulletin".to_string(),
            skip: 9,
            separators: vec![".".to_string(), "-".to_string(), "/".to_string()],
        },
        date_formats: word_then_numeric_formats(),
        month_corrections: vec![Replacement::new("30", "03")],
        detail: Some(DetailSelectors {
            content: "div.content".to_string(),
            item: "a".to_string(),
            languages: vec!["English".to_string(), "Telugu".to_string()],
        }),
        timeout_secs: None,
    }
}
