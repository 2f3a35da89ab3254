//! Scripted [`Fetch`] implementation for unit tests.

use crate::http::{Fetch, FetchError, FetchResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Serves canned responses per URL and counts the requests it receives.
///
/// A URL's script is consumed front to back; its last entry repeats once
/// the script runs dry. Unknown URLs answer with a connection failure.
#[derive(Debug, Default)]
pub struct StubFetcher {
    scripts: Mutex<HashMap<String, VecDeque<Result<FetchResponse, FetchError>>>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, url: &str, responses: Vec<Result<FetchResponse, FetchError>>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), responses.into());
        self
    }

    pub fn always(self, url: &str, response: Result<FetchResponse, FetchError>) -> Self {
        self.script(url, vec![response])
    }

    pub fn page(self, url: &str, html: &str) -> Self {
        self.always(url, Ok(FetchResponse::ok(html)))
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

impl Fetch for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

        let mut scripts = self.scripts.lock().unwrap();
        let Some(script) = scripts.get_mut(url) else {
            return Err(FetchError::Connect {
                url: url.to_string(),
                reason: "no scripted response".to_string(),
            });
        };
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap()
        }
    }
}
