//! Data models for listing pages, article links and extracted records.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ListingPage`]: The page that enumerates links to individual articles
//! - [`ArticleLink`]: An absolute URL discovered on a listing page
//! - [`ArticleRecord`]: One extracted, cleaned article ready for persistence
//! - [`ExtractionRun`]: The records of one invocation plus run metadata
//!
//! Field order on [`ArticleRecord`] is the column order of the CSV output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A listing page and the selector rule that picks its article links.
///
/// Fetched once per run and never persisted.
#[derive(Debug, Clone, Copy)]
pub struct ListingPage<'a> {
    /// Base URL of the listing page; relative hrefs are joined onto it.
    pub url: &'a str,
    /// CSS selector identifying link elements on the page.
    pub selector: &'a str,
}

/// An article URL in absolute form.
///
/// Built by the link extractor, which joins relative hrefs onto the
/// listing page URL before wrapping them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleLink(String);

impl ArticleLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single extracted article.
///
/// Created only when a page yields both a title and a non-empty body;
/// both fields hold normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Normalized page title.
    pub title: String,
    /// Normalized concatenation of the page's paragraphs.
    pub description: String,
    /// Label of the site the article came from (e.g. "Dawn").
    pub source: String,
    /// Absolute article URL.
    pub url: ArticleLink,
}

/// The records produced by one invocation.
///
/// Serialized as the optional JSON snapshot; the CSV output carries only
/// the records.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractionRun {
    /// The date of the run in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The local time of the run in `HH:MM:SS.micros` format.
    pub local_time: String,
    /// Number of configured sources that were processed.
    pub source_count: usize,
    pub records: Vec<ArticleRecord>,
}
