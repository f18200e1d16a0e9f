//! CSV export for CMS import: one header row and one article row.
//!
//! Fields are quoted per RFC 4180 when they contain a comma, quote or line
//! break; rows end with CRLF.

use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::export::{prepare_output_path, ExportError};
use crate::models::{Article, KeywordSet};

pub const CSV_HEADERS: [&str; 5] = [
    "Title",
    "Content",
    "Meta Description",
    "Keywords",
    "Category/Tag",
];

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> std::io::Result<()> {
    let line = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")
}

/// Writes the header row and the article row to `writer`.
pub fn write_article_csv<W: Write>(
    writer: &mut W,
    article: &Article,
    keywords: &KeywordSet,
    category: Option<&str>,
) -> Result<(), ExportError> {
    if keywords.is_empty() {
        return Err(ExportError::NoKeywords);
    }

    let joined = keywords.joined();
    let io_err = |source| ExportError::Io {
        path: PathBuf::from("<writer>"),
        source,
    };

    write_row(writer, &CSV_HEADERS).map_err(io_err)?;
    write_row(
        writer,
        &[
            article.title.as_str(),
            article.body.as_str(),
            article.meta_description.as_deref().unwrap_or_default(),
            joined.as_str(),
            category.unwrap_or_default(),
        ],
    )
    .map_err(io_err)
}

/// Exports the article to a CSV file, creating parent directories.
/// Returns the absolute path written.
pub fn export_article_csv(
    article: &Article,
    keywords: &KeywordSet,
    output_path: &Path,
    category: Option<&str>,
) -> Result<PathBuf, ExportError> {
    if keywords.is_empty() {
        return Err(ExportError::NoKeywords);
    }

    let resolved = prepare_output_path(output_path)?;
    let mut buffer = Vec::new();
    write_article_csv(&mut buffer, article, keywords, category)?;
    std::fs::write(&resolved, buffer).map_err(|source| ExportError::Io {
        path: resolved.clone(),
        source,
    })?;

    info!("Exported CSV to {}", resolved.display());
    Ok(resolved)
}
