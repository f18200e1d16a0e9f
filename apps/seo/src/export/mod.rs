// Result files: CMS-importable CSV and JSON documents (content, evaluation report).

pub mod csv;
pub mod report;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use self::csv::{export_article_csv, write_article_csv};
pub use report::{render_text_report, write_evaluation_report, write_json};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("At least one keyword is required to export content")]
    NoKeywords,

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Makes `path` absolute against the working directory and creates its parent.
pub(crate) fn prepare_output_path(path: &Path) -> Result<PathBuf, ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_err(io_err)?.join(path)
    };

    if let Some(parent) = resolved.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    Ok(resolved)
}
