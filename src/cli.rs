//! Command-line interface definitions for News Harvest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment variables.

use crate::http::RetryPolicy;
use clap::Parser;
use std::time::Duration;

/// Command-line arguments for the News Harvest application.
///
/// # Examples
///
/// ```sh
/// # Scrape Dawn into the default CSV
/// news_harvest
///
/// # Scrape a list of sources and also keep a JSON snapshot
/// news_harvest --sources sources.yaml -o data/news.csv --json-output data/news.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Listing page base URL
    #[arg(long, env = "NEWS_URL", default_value = "https://www.dawn.com")]
    pub url: String,

    /// Label written into the `source` column
    #[arg(long, env = "NEWS_SOURCE", default_value = "Dawn")]
    pub source: String,

    /// CSS selector for article links on the listing page
    #[arg(long, env = "NEWS_SELECTOR", default_value = "article.story a.story__link")]
    pub selector: String,

    /// YAML file listing several sources; replaces --url/--source/--selector
    #[arg(long, env = "NEWS_SOURCES_FILE")]
    pub sources: Option<String>,

    /// CSV file to (over)write
    #[arg(short, long, env = "NEWS_OUTPUT", default_value = "data/dawnData.csv")]
    pub output: String,

    /// Optional JSON snapshot of the run
    #[arg(long, env = "NEWS_JSON_OUTPUT")]
    pub json_output: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "NEWS_TIMEOUT_SECS", default_value_t = 20)]
    pub timeout_secs: u64,

    /// Retries after the first attempt on transient failures
    #[arg(long, env = "NEWS_MAX_RETRIES", default_value_t = 5)]
    pub max_retries: usize,

    /// Backoff factor in milliseconds; the first retry is immediate, retry n > 1 waits factor * 2^(n-1)
    #[arg(long, env = "NEWS_BACKOFF_FACTOR_MS", default_value_t = 1000)]
    pub backoff_factor_ms: u64,

    /// Upper bound of random jitter added to each backoff, in milliseconds
    #[arg(long, env = "NEWS_RETRY_JITTER_MS", default_value_t = 0)]
    pub retry_jitter_ms: u64,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "NEWS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            backoff_factor: Duration::from_millis(self.backoff_factor_ms),
            max_jitter: Duration::from_millis(self.retry_jitter_ms),
            ..RetryPolicy::default()
        }
    }
}
