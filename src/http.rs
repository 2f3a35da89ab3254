//! HTTP fetching with exponential backoff retry logic.
//!
//! This module provides the single network seam of the application. Every
//! page, listing or article, is retrieved through the [`Fetch`] trait.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`Fetch`]: Core trait defining an async GET returning status and body
//! - [`HttpFetcher`]: `reqwest`-backed implementation with a request timeout
//! - [`RetryFetch`]: Decorator that adds retry logic to any `Fetch` implementation
//!
//! # Retry Strategy
//!
//! - Maximum 5 retries after the first attempt
//! - Retries on statuses 502, 503, 504 and 524, and on timeouts or
//!   connection failures
//! - Immediate first retry, then exponential backoff (2, 4, 8, 16 seconds),
//!   capped at 30 seconds
//! - A `Retry-After` header on a 503 replaces the computed delay
//!
//! Any other status is handed back to the caller untouched; the extractors
//! parse whatever body the server sent.

use rand::{Rng, rng};
use reqwest::header::RETRY_AFTER;
use std::error::Error as _;
use std::fmt;
use std::io::ErrorKind;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("news_harvest/", env!("CARGO_PKG_VERSION"));

/// Failure to obtain a page.
///
/// Every variant carries the URL that was requested so callers can log it
/// without threading the URL separately.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request to {url} timed out: {reason}")]
    Timeout { url: String, reason: String },

    #[error("could not connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("connection to {url} dropped: {reason}")]
    Reset { url: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("{url} kept answering HTTP {status} after {attempts} attempts")]
    RetriesExhausted {
        url: String,
        status: u16,
        attempts: usize,
    },
}

impl FetchError {
    /// Classify a `reqwest` error for the given URL.
    pub fn from_reqwest(url: &str, e: &reqwest::Error) -> Self {
        let url = url.to_string();
        let reason = e.to_string();
        if e.is_timeout() {
            FetchError::Timeout { url, reason }
        } else if e.is_connect() {
            FetchError::Connect { url, reason }
        } else if e.is_builder() {
            FetchError::Request { url, reason }
        } else if e.is_request() || connection_dropped(e) {
            FetchError::Reset { url, reason }
        } else {
            FetchError::Request { url, reason }
        }
    }

    /// Whether another attempt might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Timeout { .. } | FetchError::Connect { .. } | FetchError::Reset { .. }
        )
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url, .. }
            | FetchError::Connect { url, .. }
            | FetchError::Reset { url, .. }
            | FetchError::Request { url, .. }
            | FetchError::RetriesExhausted { url, .. } => url,
        }
    }
}

/// Whether an I/O error in the source chain shows the peer hung up.
fn connection_dropped(e: &reqwest::Error) -> bool {
    let mut source = e.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
    /// Delay requested by the server through `Retry-After` (seconds form only).
    pub retry_after: Option<Duration>,
}

#[cfg(test)]
impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            retry_after: None,
        }
    }
}

/// Trait for fetching a page over HTTP.
///
/// Implementors return the final status and body of a GET request. A
/// non-success status is not an error at this level.
pub trait Fetch {
    /// Issue a GET request for `url`.
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// `reqwest`-backed [`Fetch`] implementation.
///
/// The inner client pools connections, so one `HttpFetcher` acts as the
/// session for a whole run.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, &e))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, &e))?;

        debug!(
            status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(FetchResponse {
            status,
            body,
            retry_after,
        })
    }
}

/// Parse a `Retry-After` value given in delta-seconds.
///
/// The HTTP-date form is not supported and yields `None`.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Retry behavior for [`RetryFetch`].
///
/// The first retry follows immediately; the delay before retry `n > 1`
/// (1-based) follows:
/// ```text
/// delay = min(backoff_factor * 2^(n-1), max_backoff) + random_jitter(0..=max_jitter)
/// ```
/// With the defaults that is 0, 2, 4, 8 and 16 seconds.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: usize,
    pub backoff_factor: Duration,
    pub max_backoff: Duration,
    pub max_jitter: Duration,
    /// Statuses treated as transient.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_factor: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            max_jitter: Duration::ZERO,
            retryable_statuses: vec![502, 503, 504, 524],
        }
    }
}

impl RetryPolicy {
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Backoff before retry number `retry` (1-based), without jitter.
    pub fn backoff(&self, retry: usize) -> Duration {
        if retry <= 1 {
            return Duration::ZERO;
        }
        let exponent = retry.saturating_sub(1).min(31) as u32;
        self.backoff_factor
            .saturating_mul(2u32.saturating_pow(exponent))
            .min(self.max_backoff)
    }

    fn jitter(&self) -> Duration {
        let max_ms = self.max_jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rng().random_range(0..=max_ms))
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`Fetch`] implementation.
pub struct RetryFetch<T> {
    /// The underlying fetcher to wrap.
    inner: T,
    policy: RetryPolicy,
}

impl<T> RetryFetch<T>
where
    T: Fetch,
{
    /// Create a new retry wrapper around an existing [`Fetch`] implementation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = HttpFetcher::new(Duration::from_secs(20))?;
    /// let fetcher = RetryFetch::new(client, RetryPolicy::default());
    /// ```
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    #[cfg(test)]
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("policy", &self.policy)
            .finish()
    }
}

impl<T> Fetch for RetryFetch<T>
where
    T: Fetch,
{
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let total_t0 = Instant::now();
        let mut retries = 0usize;

        loop {
            let outcome = self.inner.fetch(url).await;

            let retry = match &outcome {
                Ok(resp) if self.policy.is_retryable_status(resp.status) => {
                    let server_delay = if resp.status == 503 {
                        resp.retry_after
                    } else {
                        None
                    };
                    Some((server_delay, format!("HTTP {}", resp.status)))
                }
                Err(e) if e.is_transient() => Some((None, e.to_string())),
                _ => None,
            };
            let Some((server_delay, cause)) = retry else {
                return outcome;
            };

            retries += 1;
            if retries > self.policy.max_retries {
                error!(
                    attempts = retries,
                    elapsed_ms_total = total_t0.elapsed().as_millis() as u64,
                    %cause,
                    "fetch exhausted retries"
                );
                return match outcome {
                    Ok(resp) => Err(FetchError::RetriesExhausted {
                        url: url.to_string(),
                        status: resp.status,
                        attempts: retries,
                    }),
                    Err(e) => Err(e),
                };
            }

            let delay = match server_delay {
                Some(requested) => requested.min(self.policy.max_backoff),
                None => self.policy.backoff(retries) + self.policy.jitter(),
            };

            warn!(
                retry = retries,
                max = self.policy.max_retries,
                ?delay,
                %cause,
                "fetch attempt failed; backing off"
            );
            sleep(delay).await;
        }
    }
}
