//! Page scrapers for discovering and reading articles.
//!
//! Scraping follows a consistent two-phase pattern:
//!
//! 1. **Indexing**: [`links::extract_links`] reads a listing page and returns
//!    the article URLs matched by a CSS selector
//! 2. **Fetching**: [`article::extract_article`] downloads one article and
//!    turns it into an [`ArticleRecord`](crate::models::ArticleRecord)
//!
//! Both phases go through a [`Fetch`](crate::http::Fetch) implementation, so
//! retry behavior lives in one place. Fetch failures are logged and absorbed;
//! only a malformed selector rule escapes as an [`ExtractError`].

use scraper::Selector;
use thiserror::Error;

pub mod article;
pub mod links;

/// Structural failure while extracting. Aborts the run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Parse a CSS selector, keeping the offending rule in the error.
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
