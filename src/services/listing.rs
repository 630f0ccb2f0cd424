// src/services/listing.rs

//! Listing page parsing.
//!
//! Turns a listing page into dated entries using the source's selectors and
//! date rule, and picks the newest one.

use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{SourceConfig, sentinel_date};
use crate::services::dates::{extract_date_text, parse_date};
use crate::utils::resolve_url;

/// One dated entry from a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub date: NaiveDate,
    pub title: String,
    /// Absolute link target, `None` when the anchor has no `href`
    pub link: Option<String>,
}

/// Parse every entry of a listing page.
///
/// A missing container or an entry without an anchor means the page no
/// longer looks the way the selectors expect. An entry whose date cannot be
/// parsed fails the whole listing instead of being skipped, since skipping
/// could silently promote an older bulletin to "latest".
pub fn parse_listing(source: &SourceConfig, html: &str) -> Result<Vec<ListingEntry>> {
    let selectors = source.listing.compile()?;
    let base_url = Url::parse(&source.listing_url)?;
    let document = Html::parse_document(html);

    let rows: Vec<ElementRef> = match &selectors.container {
        Some(container_sel) => {
            let mut candidates = document.select(container_sel);
            let container = match &source.listing.container_marker {
                Some(marker) => {
                    candidates.find(|c| c.text().collect::<String>().contains(marker.as_str()))
                }
                None => candidates.next(),
            };
            let container = container.ok_or_else(|| {
                AppError::structure(
                    &source.name,
                    format!(
                        "no '{}' container{} on {}",
                        source.listing.container.as_deref().unwrap_or_default(),
                        source
                            .listing
                            .container_marker
                            .as_deref()
                            .map(|m| format!(" mentioning '{m}'"))
                            .unwrap_or_default(),
                        source.listing_url
                    ),
                )
            })?;
            container.select(&selectors.entry).collect()
        }
        None => document.select(&selectors.entry).collect(),
    };

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        let anchor = row.select(&selectors.link).next().ok_or_else(|| {
            AppError::structure(
                &source.name,
                format!("entry without '{}' element", source.listing.link),
            )
        })?;

        let title: String = anchor.text().collect();
        let date_text = extract_date_text(&title, &source.date_rule)
            .ok_or_else(|| AppError::date_parse(&source.name, title.trim()))?;
        let date = parse_date(&date_text, &source.date_formats, &source.month_corrections)
            .ok_or_else(|| AppError::date_parse(&source.name, date_text.as_str()))?;
        let link = anchor
            .value()
            .attr("href")
            .map(|href| resolve_url(&base_url, href.trim()));

        entries.push(ListingEntry {
            date,
            title: title.trim().to_string(),
            link,
        });
    }
    Ok(entries)
}

/// The entry with the greatest date strictly after the sentinel.
///
/// Ties keep the first entry seen.
pub fn select_latest(entries: &[ListingEntry]) -> Option<&ListingEntry> {
    let mut latest: Option<&ListingEntry> = None;
    let mut latest_date = sentinel_date();
    for entry in entries {
        if entry.date > latest_date {
            latest_date = entry.date;
            latest = Some(entry);
        }
    }
    latest
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::sources;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const KERALA_LISTING: &str = r#"
        <html><body>
          <h3 class="entry-title"><a href="/2020/04/01/bulletin-a/">01/04/2020 Daily Bulletin</a></h3>
          <h3 class="entry-title"><a href="/2020/04/15/bulletin-b/">15/04/2020 Daily Bulletin</a></h3>
          <h3 class="entry-title"><a href="/2020/03/30/bulletin-c/">30/03/2020 Daily Bulletin</a></h3>
          <h3 class="other"><a href="/ignored/">20/04/2020 Not a bulletin</a></h3>
        </body></html>
    "#;

    #[test]
    fn test_kerala_listing_selects_latest() {
        let source = sources::kerala::source();
        let entries = parse_listing(&source, KERALA_LISTING).unwrap();
        assert_eq!(entries.len(), 3);

        let latest = select_latest(&entries).unwrap();
        assert_eq!(latest.date, date(2020, 4, 15));
        assert_eq!(
            latest.link.as_deref(),
            Some("http://dhs.kerala.gov.in/2020/04/15/bulletin-b/")
        );
    }

    #[test]
    fn test_empty_listing() {
        let source = sources::kerala::source();
        let entries = parse_listing(&source, "<html><body></body></html>").unwrap();
        assert!(entries.is_empty());
        assert!(select_latest(&entries).is_none());
    }

    #[test]
    fn test_sentinel_and_older_never_win() {
        let entries = vec![
            ListingEntry {
                date: sentinel_date(),
                title: "sentinel".to_string(),
                link: Some("a".to_string()),
            },
            ListingEntry {
                date: date(2018, 12, 31),
                title: "old".to_string(),
                link: Some("b".to_string()),
            },
        ];
        assert!(select_latest(&entries).is_none());
    }

    #[test]
    fn test_ties_keep_first() {
        let entries = vec![
            ListingEntry {
                date: date(2020, 4, 15),
                title: "first".to_string(),
                link: Some("a".to_string()),
            },
            ListingEntry {
                date: date(2020, 4, 15),
                title: "second".to_string(),
                link: Some("b".to_string()),
            },
        ];
        assert_eq!(select_latest(&entries).unwrap().title, "first");
    }

    #[test]
    fn test_delhi_listing_mixed_formats() {
        let source = sources::delhi::source();
        let html = r#"
            <table><tr><td class="standard"><ul>
              <li><a href="/wps/bulletin-05.pdf">Health Bulletin Dated 05.04.2020</a></li>
              <li><a href="/wps/bulletin-12.pdf">HEALTH BULLETIN DATED 12 APRIL 2020</a></li>
            </ul></td></tr></table>
        "#;
        let entries = parse_listing(&source, html).unwrap();
        let latest = select_latest(&entries).unwrap();
        assert_eq!(latest.date, date(2020, 4, 12));
        assert_eq!(
            latest.link.as_deref(),
            Some("http://health.delhigovt.nic.in/wps/bulletin-12.pdf")
        );
    }

    #[test]
    fn test_delhi_missing_container() {
        let source = sources::delhi::source();
        let err = parse_listing(&source, "<ul><li><a>Dated 05.04.2020</a></li></ul>").unwrap_err();
        assert!(matches!(err, AppError::PageStructureChanged { .. }));
    }

    #[test]
    fn test_telangana_listing() {
        let source = sources::telangana::source();
        let html = r#"
            <div class="ast-row">
              <h2 class="entry-title"><a href="https://covid19.telangana.gov.in/wp-content/uploads/2020/04/b5.pdf">Media Bulletin - 5th April, 2020</a></h2>
              <h2 class="entry-title"><a href="https://covid19.telangana.gov.in/wp-content/uploads/2020/04/b4.pdf">Media Bulletin - 4th April, 2020</a></h2>
            </div>
        "#;
        let entries = parse_listing(&source, html).unwrap();
        let latest = select_latest(&entries).unwrap();
        assert_eq!(latest.date, date(2020, 4, 5));
        assert!(latest.link.as_deref().unwrap().ends_with("b5.pdf"));
    }

    #[test]
    fn test_andhra_container_marker_and_correction() {
        let source = sources::andhra_pradesh::source();
        let html = r#"
            <div class="panel"><ul><li><a href="/press/1">Press Release 01.04.2020</a></li></ul></div>
            <div class="panel"><h4>Daily Bulletin</h4><ul>
              <li><a href="/bulletin/2">Media Bulletin 02.04.2020</a></li>
              <li><a href="/bulletin/1">Media Bulletin 05.30.2020</a></li>
            </ul></div>
        "#;
        let entries = parse_listing(&source, html).unwrap();
        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2020, 4, 2), date(2020, 3, 5)]);
    }

    #[test]
    fn test_tamil_nadu_listing() {
        let source = sources::tamil_nadu::source();
        assert_eq!(source.timeout(), Some(Duration::from_secs(60)));

        let html = r#"
            <div class="entry-content"><ul>
              <li><a href="/wp-content/uploads/2020/04/bulletin-14.pdf">Media Bulletin 14.04.2020</a></li>
              <li><a href="/wp-content/uploads/2020/04/bulletin-16.pdf">MEDIA BULLETIN 16 April 2020</a></li>
              <li><a href="/wp-content/uploads/2020/04/bulletin-15.pdf">Media Bulletin 15.04.2020</a></li>
            </ul></div>
        "#;
        let entries = parse_listing(&source, html).unwrap();
        assert_eq!(entries.len(), 3);

        let latest = select_latest(&entries).unwrap();
        assert_eq!(latest.date, date(2020, 4, 16));
        assert_eq!(
            latest.link.as_deref(),
            Some("https://stopcorona.tn.gov.in/wp-content/uploads/2020/04/bulletin-16.pdf")
        );
    }

    #[test]
    fn test_unparseable_date_is_fatal() {
        let source = sources::kerala::source();
        let html = r#"<h3 class="entry-title"><a href="/x/">Latest Bulletin</a></h3>"#;
        let err = parse_listing(&source, html).unwrap_err();
        assert!(matches!(err, AppError::DateParseFailure { .. }));
    }

    #[test]
    fn test_entry_without_anchor() {
        let source = sources::kerala::source();
        let html = r#"<h3 class="entry-title">15/04/2020</h3>"#;
        let err = parse_listing(&source, html).unwrap_err();
        assert!(matches!(err, AppError::PageStructureChanged { .. }));
    }
}
