//! Article page scraper.
//!
//! The title comes from the first `<title>` element; the body is the
//! trimmed text of every non-empty `<p>`, joined by single spaces. Both are
//! passed through [`normalize`](crate::normalize::normalize) before a record
//! is built.

use crate::http::Fetch;
use crate::models::{ArticleLink, ArticleRecord};
use crate::normalize::normalize;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, error, instrument};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Fetch a single article and build its record.
///
/// Returns `None` when the fetch fails (logged) or when the page lacks a
/// title or any paragraph text (not logged).
#[instrument(level = "info", skip_all, fields(url = %link))]
pub async fn extract_article<F: Fetch>(
    fetcher: &F,
    link: &ArticleLink,
    source: &str,
) -> Option<ArticleRecord> {
    let response = match fetcher.fetch(link.as_str()).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, url = %link, "Failed to fetch article");
            return None;
        }
    };

    article_from_page(&response.body, link, source)
}

/// Build a record from an already fetched article page.
pub fn article_from_page(html: &str, link: &ArticleLink, source: &str) -> Option<ArticleRecord> {
    let document = Html::parse_document(html);

    let Some(title) = title_text(&document) else {
        debug!("Article has no title; skipping");
        return None;
    };
    let Some(body) = body_text(&document) else {
        debug!("Article has no paragraph text; skipping");
        return None;
    };

    Some(ArticleRecord {
        title: normalize(&title),
        description: normalize(&body),
        source: source.to_string(),
        url: link.clone(),
    })
}

fn title_text(document: &Html) -> Option<String> {
    document
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

fn body_text(document: &Html) -> Option<String> {
    let paragraphs = document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>();

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::FetchError;
    use crate::test_support::StubFetcher;

    const URL: &str = "https://www.dawn.com/news/1/storm-warning";

    fn link() -> ArticleLink {
        ArticleLink::new(URL)
    }

    #[test]
    fn test_article_from_page() {
        let html = r#"
            <html>
              <head><title>  Storm Warning | Dawn  </title></head>
              <body>
                <p>Heavy rain expected.</p>
                <p>   </p>
                <p>Residents are <b>advised</b> to stay indoors!</p>
              </body>
            </html>
        "#;
        let record = article_from_page(html, &link(), "Dawn").unwrap();
        assert_eq!(record.title, "Storm Warning Dawn");
        assert_eq!(
            record.description,
            "Heavy rain expected Residents are advised to stay indoors"
        );
        assert_eq!(record.source, "Dawn");
        assert_eq!(record.url, link());
    }

    #[test]
    fn test_title_without_paragraphs_is_skipped() {
        let html = "<html><head><title>Storm Warning</title></head><body><div>text</div></body></html>";
        assert!(article_from_page(html, &link(), "Dawn").is_none());
    }

    #[test]
    fn test_only_blank_paragraphs_is_skipped() {
        let html = "<html><head><title>Storm Warning</title></head><body><p> </p><p>\n</p></body></html>";
        assert!(article_from_page(html, &link(), "Dawn").is_none());
    }

    #[test]
    fn test_missing_or_blank_title_is_skipped() {
        let no_title = "<html><body><p>Heavy rain expected.</p></body></html>";
        assert!(article_from_page(no_title, &link(), "Dawn").is_none());

        let blank_title = "<html><head><title>  </title></head><body><p>Heavy rain.</p></body></html>";
        assert!(article_from_page(blank_title, &link(), "Dawn").is_none());
    }

    #[test]
    fn test_only_first_title_is_used() {
        let html = r#"
            <html><head><title>First</title></head>
            <body><svg><title>Second</title></svg><p>Body</p></body></html>
        "#;
        let record = article_from_page(html, &link(), "Dawn").unwrap();
        assert_eq!(record.title, "First");
    }

    #[test]
    fn test_punctuation_only_title_still_yields_record() {
        let html = "<html><head><title>!!!</title></head><body><p>Body.</p></body></html>";
        let record = article_from_page(html, &link(), "Dawn").unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.description, "Body");
    }

    #[tokio::test]
    async fn test_extract_article_fetch_failure_is_skipped() {
        let stub = StubFetcher::new().always(
            URL,
            Err(FetchError::Timeout {
                url: URL.to_string(),
                reason: "operation timed out".to_string(),
            }),
        );
        assert!(extract_article(&stub, &link(), "Dawn").await.is_none());
        assert_eq!(stub.calls(URL), 1);
    }

    #[tokio::test]
    async fn test_extract_article_fetches_page() {
        let stub = StubFetcher::new().page(
            URL,
            "<title>Storm Warning</title><p>Heavy rain expected.</p>",
        );
        let record = extract_article(&stub, &link(), "Dawn").await.unwrap();
        assert_eq!(record.title, "Storm Warning");
        assert_eq!(record.description, "Heavy rain expected");
    }
}
