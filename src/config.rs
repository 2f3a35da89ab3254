//! Source configuration.
//!
//! A run scrapes one or more sources. Without a sources file the single
//! source given on the command line (Dawn by default) is used; with one,
//! the file's list replaces it:
//!
//! ```yaml
//! sources:
//!   - url: https://www.dawn.com
//!     source: Dawn
//!     selector: article.story a.story__link
//! ```

use crate::cli::Cli;
use crate::models::ListingPage;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read sources file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse sources file {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("source `{source_label}` has an invalid listing URL `{url}`: {reason}")]
    InvalidUrl {
        source_label: String,
        url: String,
        reason: url::ParseError,
    },

    #[error("no sources configured")]
    NoSources,
}

/// One site to scrape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    /// Listing page base URL.
    pub url: String,
    /// Label written into every record of this source.
    pub source: String,
    /// CSS selector for link elements on the listing page.
    pub selector: String,
}

impl SourceConfig {
    pub fn listing(&self) -> ListingPage<'_> {
        ListingPage {
            url: &self.url,
            selector: &self.selector,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.url).map_err(|reason| ConfigError::InvalidUrl {
            source_label: self.source.clone(),
            url: self.url.clone(),
            reason,
        })?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SourcesFile {
    sources: Vec<SourceConfig>,
}

/// Parse a YAML sources document.
pub fn parse_sources(yaml: &str, path: &str) -> Result<Vec<SourceConfig>, ConfigError> {
    let file: SourcesFile = serde_yaml::from_str(yaml).map_err(|source| ConfigError::Yaml {
        path: path.to_string(),
        source,
    })?;
    Ok(file.sources)
}

/// Load sources from a YAML file.
pub fn load_sources(path: impl AsRef<Path>) -> Result<Vec<SourceConfig>, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;
    parse_sources(&yaml, &display)
}

/// Work out which sources this run scrapes.
///
/// Every listing URL must be absolute, and the resulting list must not be
/// empty.
pub fn resolve_sources(args: &Cli) -> Result<Vec<SourceConfig>, ConfigError> {
    let sources = match &args.sources {
        Some(path) => {
            let sources = load_sources(path)?;
            info!(path = %path, count = sources.len(), "Loaded sources file");
            sources
        }
        None => vec![SourceConfig {
            url: args.url.clone(),
            source: args.source.clone(),
            selector: args.selector.clone(),
        }],
    };

    if sources.is_empty() {
        return Err(ConfigError::NoSources);
    }
    for source in &sources {
        source.validate()?;
    }
    Ok(sources)
}
