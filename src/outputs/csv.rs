//! CSV output of article records.
//!
//! The file has the header `title,description,source,url` and one row per
//! record, with `\n` line endings and quoting only where a field needs it.

use crate::models::ArticleRecord;
use crate::outputs::{OutputError, ensure_parent_dir};
use tokio::fs;
use tracing::{info, instrument};

/// Encode records as CSV text, header first.
pub fn encode_records(records: &[ArticleRecord]) -> Result<Vec<u8>, OutputError> {
    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer.into_inner().map_err(|e| OutputError::Io {
        path: "<memory>".to_string(),
        source: e.into_error(),
    })
}

/// Overwrite `path` with the records.
///
/// Returns `false` without touching the file system when there is nothing
/// to save.
#[instrument(level = "info", skip(records), fields(count = records.len()))]
pub async fn write_records(records: &[ArticleRecord], path: &str) -> Result<bool, OutputError> {
    if records.is_empty() {
        info!("No data to save.");
        return Ok(false);
    }

    let bytes = encode_records(records)?;
    ensure_parent_dir(path).await?;
    fs::write(path, bytes)
        .await
        .map_err(|source| OutputError::Io {
            path: path.to_string(),
            source,
        })?;
    info!(%path, "Wrote CSV file");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleLink;

    fn record(title: &str, description: &str, url: &str) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            description: description.to_string(),
            source: "Dawn".to_string(),
            url: ArticleLink::new(url),
        }
    }

    #[test]
    fn test_encode_records() {
        let records = vec![
            record("Storm Warning", "Heavy rain expected", "https://www.dawn.com/news/a"),
            record("Budget", "Taxes rise", "https://www.dawn.com/news/b?id=1,2"),
        ];
        let csv = String::from_utf8(encode_records(&records).unwrap()).unwrap();
        assert_eq!(
            csv,
            "title,description,source,url\n\
             Storm Warning,Heavy rain expected,Dawn,https://www.dawn.com/news/a\n\
             Budget,Taxes rise,Dawn,\"https://www.dawn.com/news/b?id=1,2\"\n"
        );
    }

    #[tokio::test]
    async fn test_write_records_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("dawnData.csv");
        let path = path.to_str().unwrap();

        let first = vec![
            record("One", "first", "https://www.dawn.com/1"),
            record("Two", "second", "https://www.dawn.com/2"),
        ];
        assert!(write_records(&first, path).await.unwrap());

        let second = vec![record("Three", "third", "https://www.dawn.com/3")];
        assert!(write_records(&second, path).await.unwrap());

        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            contents,
            "title,description,source,url\nThree,third,Dawn,https://www.dawn.com/3\n"
        );
    }

    #[tokio::test]
    async fn test_empty_records_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dawnData.csv");
        let path = path.to_str().unwrap();

        assert!(!write_records(&[], path).await.unwrap());
        assert!(!std::path::Path::new(path).exists());
    }

    #[tokio::test]
    async fn test_empty_records_keep_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dawnData.csv");
        let path = path.to_str().unwrap();

        write_records(&[record("One", "first", "https://www.dawn.com/1")], path)
            .await
            .unwrap();
        write_records(&[], path).await.unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("One,first"));
    }
}
