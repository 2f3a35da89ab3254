//! # News Harvest
//!
//! A scraping pipeline that reads a news site's listing page, follows every
//! article link, extracts and cleans each article's title and body, and
//! writes the results to a CSV file.
//!
//! ## Usage
//!
//! ```sh
//! news_harvest -o data/dawnData.csv
//! ```
//!
//! ## Architecture
//!
//! One invocation performs one run, sequentially:
//! 1. **Indexing**: Fetch the listing page and select article links
//! 2. **Fetching**: Download each article in document order
//! 3. **Cleaning**: Strip punctuation and collapse whitespace in title and body
//! 4. **Output**: Overwrite the CSV (and optional JSON snapshot)
//!
//! Scheduling and committing the CSV to version control are left to the
//! caller (cron, a workflow runner, a shell script).

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::instrument::WithSubscriber;
use tracing::{debug, error, info};

mod cli;
mod config;
mod http;
mod logging;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod scrapers;
#[cfg(test)]
mod test_support;
mod utils;

use cli::Cli;
use http::{HttpFetcher, RetryFetch};
use models::ExtractionRun;
use utils::{ensure_writable_dir, parent_dir};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    let dispatch = logging::dispatch(&args.log_level);
    run(args).with_subscriber(dispatch).await
}

async fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    info!("news_harvest starting up");
    debug!(?args, "Parsed CLI arguments");

    let sources = config::resolve_sources(&args)?;
    info!(count = sources.len(), "Sources configured");

    // Fail before any network traffic if the results cannot be saved
    let output_dir = parent_dir(&args.output);
    if let Err(e) = ensure_writable_dir(output_dir).await {
        error!(
            path = %output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = HttpFetcher::new(args.timeout())?;
    let fetcher = RetryFetch::new(client, args.retry_policy());
    debug!(?fetcher, "HTTP client ready");

    let mut records = Vec::new();
    for source in &sources {
        let extracted = pipeline::run_extraction(&fetcher, source).await?;
        records.extend(extracted);
    }
    info!(count = records.len(), "Total records extracted");

    outputs::csv::write_records(&records, &args.output).await?;

    if let Some(json_path) = &args.json_output {
        let now = Local::now();
        let run = ExtractionRun {
            local_date: now.date_naive().to_string(),
            local_time: now.time().to_string(),
            source_count: sources.len(),
            records,
        };
        if let Err(e) = outputs::json::write_run(&run, json_path).await {
            error!(path = %json_path, error = %e, "Failed to write JSON snapshot");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
