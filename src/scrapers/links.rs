//! Listing page indexing.
//!
//! Article links are read from the `href` attribute of every element the
//! selector rule matches, in document order. Duplicates are kept.
//!
//! # URL Pattern
//!
//! Hrefs that already parse as absolute URLs are kept verbatim. Anything else
//! is joined onto the listing URL by plain concatenation:
//! `https://www.dawn.com` + `/news/1` gives `https://www.dawn.com/news/1`.
//! This is not RFC 3986 resolution; `../x` or a listing URL with a path
//! produce the same concatenated string downstream consumers already see.

use crate::http::Fetch;
use crate::models::{ArticleLink, ListingPage};
use crate::scrapers::{ExtractError, parse_selector};
use scraper::Html;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Index a listing page and return its article links.
///
/// A fetch failure is logged and yields an empty list. An invalid selector
/// rule is returned as an error.
#[instrument(level = "info", skip_all, fields(url = %listing.url, selector = %listing.selector))]
pub async fn extract_links<F: Fetch>(
    fetcher: &F,
    listing: ListingPage<'_>,
) -> Result<Vec<ArticleLink>, ExtractError> {
    let response = match fetcher.fetch(listing.url).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, url = %e.url(), "Failed to fetch listing page");
            return Ok(Vec::new());
        }
    };

    let links = links_in_page(&response.body, listing)?;
    info!(
        count = links.len(),
        status = response.status,
        "Indexed article links"
    );
    debug!(links = ?links, "Article links");
    Ok(links)
}

/// Select link elements from an already fetched listing page.
pub fn links_in_page(
    html: &str,
    listing: ListingPage<'_>,
) -> Result<Vec<ArticleLink>, ExtractError> {
    let selector = parse_selector(listing.selector)?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| normalize_href(listing.url, href))
        .collect())
}

/// Make an href absolute relative to the listing base URL.
pub fn normalize_href(base: &str, href: &str) -> ArticleLink {
    if Url::parse(href).is_ok() {
        ArticleLink::new(href)
    } else {
        ArticleLink::new(format!("{}/{}", base, href.trim_start_matches('/')))
    }
}
