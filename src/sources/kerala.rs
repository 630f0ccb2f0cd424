//! Kerala Directorate of Health Services.
//!
//! Listing titles start with `DD/MM/YYYY`. Each title links to a post whose
//! body has one paragraph per language; the English one carries the PDF.

use crate::models::{DateRule, DetailSelectors, ListingSelectors, SourceConfig};

use super::KERALA;

const LISTING_URL: &str = "http://dhs.kerala.gov.in/%e0%b4%a1%e0%b5%86%e0%b4%af%e0%b4%bf\
%e0%b4%b2%e0%b4%bf-%e0%b4%ac%e0%b5%81%e0%b4%b3%e0%b5%8d%e0%b4%b3%e0%b4%b1%e0%b5%8d\
%e0%b4%b1%e0%b4%bf%e0%b4%a8%e0%b5%8d%e2%80%8d/";

pub fn source() -> SourceConfig {
    SourceConfig {
        name: KERALA.to_string(),
        listing_url: LISTING_URL.to_string(),
        listing: ListingSelectors {
            container: None,
            container_marker: None,
            entry: "h3.entry-title".to_string(),
            link: "a".to_string(),
        },
        date_rule: DateRule::Offsets {
            day: 0,
            month: 3,
            year: 6,
        },
        date_formats: vec!["%d %m %Y".to_string()],
        month_corrections: Vec::new(),
        detail: Some(DetailSelectors {
            content: "div.entry-content".to_string(),
            item: "p".to_string(),
            languages: vec!["English".to_string()],
        }),
        timeout_secs: None,
    }
}
