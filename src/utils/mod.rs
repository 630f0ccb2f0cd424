//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("http://dhs.kerala.gov.in/bulletins/").unwrap();
        assert_eq!(
            resolve_url(&base, "page.html"),
            "http://dhs.kerala.gov.in/bulletins/page.html"
        );
        assert_eq!(
            resolve_url(&base, "/wp-content/uploads/2020/04/a.pdf"),
            "http://dhs.kerala.gov.in/wp-content/uploads/2020/04/a.pdf"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_resolve_url_keeps_unjoinable_href() {
        let base = Url::parse("mailto:health@example.org").unwrap();
        assert_eq!(resolve_url(&base, "bulletin.pdf"), "bulletin.pdf");
    }
}
