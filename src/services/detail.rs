// src/services/detail.rs

//! Detail page parsing: pick the PDF link for the preferred language.

use scraper::{ElementRef, Html};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::DetailSelectors;
use crate::utils::resolve_url;

/// Find the bulletin link on a detail page.
///
/// Languages are tried in order of preference; an item qualifies when its
/// text or its link target mentions the language. If several items mention
/// the same language, the last one on the page wins.
pub fn find_language_link(
    source_name: &str,
    detail: &DetailSelectors,
    page_url: &str,
    html: &str,
) -> Result<Option<String>> {
    let selectors = detail.compile()?;
    let base_url = Url::parse(page_url)?;
    let document = Html::parse_document(html);

    let content = document.select(&selectors.content).next().ok_or_else(|| {
        AppError::structure(
            source_name,
            format!("no '{}' block on {}", detail.content, page_url),
        )
    })?;

    let items: Vec<(String, String)> = content
        .select(&selectors.item)
        .filter_map(|item| {
            let href = item_href(item, &selectors.anchor)?;
            let text: String = item.text().collect();
            Some((text, href.to_string()))
        })
        .collect();

    for language in &detail.languages {
        let language = language.as_str();
        let found = items
            .iter()
            .rev()
            .find(|(text, href)| text.contains(language) || href.contains(language));
        if let Some((_, href)) = found {
            return Ok(Some(resolve_url(&base_url, href.trim())));
        }
    }
    Ok(None)
}

/// The item's own `href` when it is an anchor, else its first nested link.
fn item_href<'a>(item: ElementRef<'a>, anchor: &scraper::Selector) -> Option<&'a str> {
    if item.value().name() == "a" {
        return item.value().attr("href");
    }
    item.select(anchor).next()?.value().attr("href")
}
