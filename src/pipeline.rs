//! Per-source extraction: listing page to article records.

use crate::config::SourceConfig;
use crate::http::Fetch;
use crate::models::ArticleRecord;
use crate::scrapers::ExtractError;
use crate::scrapers::article::extract_article;
use crate::scrapers::links::extract_links;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument};

/// Run the full extraction for one configured source.
///
/// The listing page is indexed first; articles are then fetched one at a
/// time in document order. Failed or incomplete articles are dropped, so the
/// result may be shorter than the link list or empty. Only an invalid
/// selector rule fails the call.
#[instrument(level = "info", skip_all, fields(source = %source.source, url = %source.url))]
pub async fn run_extraction<F: Fetch>(
    fetcher: &F,
    source: &SourceConfig,
) -> Result<Vec<ArticleRecord>, ExtractError> {
    let links = extract_links(fetcher, source.listing()).await?;
    let link_count = links.len();
    let label = source.source.as_str();

    let records: Vec<ArticleRecord> = stream::iter(links)
        .then(|link| async move {
            let record = extract_article(fetcher, &link, label).await;
            if let Some(ref record) = record {
                debug!(url = %record.url, title = %truncate_for_log(&record.title, 80), "Extracted article");
            }
            record
        })
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(
        links = link_count,
        records = records.len(),
        skipped = link_count - records.len(),
        "Source extraction complete"
    );
    Ok(records)
}
