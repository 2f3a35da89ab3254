//! JSON snapshot of a run.
//!
//! Written only when `--json-output` is given. The snapshot wraps the same
//! records as the CSV in an [`ExtractionRun`] with the run date and time.

use crate::models::ExtractionRun;
use crate::outputs::{OutputError, ensure_parent_dir};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write an [`ExtractionRun`] as pretty JSON, overwriting `path`.
///
/// Like the CSV writer, returns `false` and writes nothing for a run
/// without records.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_run(run: &ExtractionRun, path: &str) -> Result<bool, OutputError> {
    if run.records.is_empty() {
        info!("No data to save.");
        return Ok(false);
    }

    let json = serde_json::to_string_pretty(run)?;
    if let Err(e) = ensure_parent_dir(path).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e);
    }

    fs::write(path, json)
        .await
        .map_err(|source| OutputError::Io {
            path: path.to_string(),
            source,
        })?;
    info!(records = run.records.len(), "Wrote JSON snapshot");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleLink, ArticleRecord};

    #[tokio::test]
    async fn test_write_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("run.json");
        let path = path.to_str().unwrap();

        let run = ExtractionRun {
            local_date: "2024-05-10".to_string(),
            local_time: "06:00:00".to_string(),
            source_count: 1,
            records: vec![ArticleRecord {
                title: "Storm Warning".to_string(),
                description: "Heavy rain expected".to_string(),
                source: "Dawn".to_string(),
                url: ArticleLink::new("https://www.dawn.com/news/a"),
            }],
        };
        assert!(write_run(&run, path).await.unwrap());

        let back: ExtractionRun =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back.records, run.records);
        assert_eq!(back.local_date, "2024-05-10");
    }

    #[tokio::test]
    async fn test_empty_run_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let path = path.to_str().unwrap();

        let run = ExtractionRun {
            local_date: "2024-05-10".to_string(),
            local_time: "06:00:00".to_string(),
            source_count: 1,
            records: vec![],
        };
        assert!(!write_run(&run, path).await.unwrap());
        assert!(!std::path::Path::new(path).exists());
    }
}
