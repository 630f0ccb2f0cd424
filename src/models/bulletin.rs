//! Bulletin record data structure.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Placeholder date that every parsed bulletin date must beat.
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).expect("2019-01-01 is a valid date")
}

/// The freshest bulletin known for one source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulletinRecord {
    /// Source (state) name
    pub source: String,

    /// Release date of the newest bulletin, `None` when nothing beat the sentinel
    pub release_date: Option<NaiveDate>,

    /// Absolute URL of the bulletin PDF
    pub pdf_link: Option<String>,

    /// When the local copy was last replaced; `None` means it was already current
    pub last_updated: Option<DateTime<Local>>,
}

impl BulletinRecord {
    /// Release date, falling back to the sentinel placeholder.
    pub fn release_date_or_sentinel(&self) -> NaiveDate {
        self.release_date.unwrap_or_else(sentinel_date)
    }

    /// Whether this run replaced or created the cached PDF.
    pub fn is_updated(&self) -> bool {
        self.last_updated.is_some()
    }

    /// One-line summary in `[date, link, last_updated]` form.
    pub fn summary(&self) -> String {
        let link = self.pdf_link.as_deref().unwrap_or("None");
        let updated = self
            .last_updated
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "None".to_string());
        format!(
            "{}: [{}, {}, {}]",
            self.source,
            self.release_date_or_sentinel(),
            link,
            updated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_record() -> BulletinRecord {
        BulletinRecord {
            source: "Kerala".to_string(),
            release_date: None,
            pdf_link: None,
            last_updated: None,
        }
    }

    #[test]
    fn test_sentinel_fallback() {
        let record = empty_record();
        assert_eq!(record.release_date_or_sentinel(), sentinel_date());
        assert!(!record.is_updated());
    }

    #[test]
    fn test_summary() {
        let mut record = empty_record();
        record.release_date = NaiveDate::from_ymd_opt(2020, 4, 15);
        record.pdf_link = Some("http://dhs.kerala.gov.in/b.pdf".to_string());
        assert_eq!(
            record.summary(),
            "Kerala: [2020-04-15, http://dhs.kerala.gov.in/b.pdf, None]"
        );
    }
}
