//! Delhi Health Department.
//!
//! Entries read like `Health Bulletin Dated 05.04.2020` or
//! `... Dated 5th April 2020` and link straight to the PDF.

use crate::models::{DateRule, ListingSelectors, SourceConfig};

use super::{DELHI, word_then_numeric_formats};

const LISTING_URL: &str =
    "http://health.delhigovt.nic.in/wps/wcm/connect/doit_health/Health/Home/Covid19/Health+Bulletin";

pub fn source() -> SourceConfig {
    SourceConfig {
        name: DELHI.to_string(),
        listing_url: LISTING_URL.to_string(),
        listing: ListingSelectors {
            container: Some("td.standard".to_string()),
            container_marker: None,
            entry: "li".to_string(),
            link: "a".to_string(),
        },
        date_rule: DateRule::Labelled {
            label: "Dated".to_string(),
            skip: 6,
            separators: vec![".".to_string()],
        },
        date_formats: word_then_numeric_formats(),
        month_corrections: Vec::new(),
        detail: None,
        timeout_secs: None,
    }
}
