//! Output generation for extracted records.
//!
//! # Submodules
//!
//! - [`csv`]: Writes the record table consumed by downstream versioning
//! - [`json`]: Writes an optional snapshot of the whole run
//!
//! Both writers overwrite their target on every run and skip writing
//! entirely when there are no records.

use thiserror::Error;

pub mod csv;
pub mod json;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create the parent directory of `path` if it has one.
pub(crate) async fn ensure_parent_dir(path: &str) -> Result<(), OutputError> {
    let parent = std::path::Path::new(path).parent();
    if let Some(dir) = parent.filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| OutputError::Io {
                path: dir.display().to_string(),
                source,
            })?;
    }
    Ok(())
}
