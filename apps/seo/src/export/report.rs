use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::evaluation::EvaluationResult;
use crate::export::{prepare_output_path, ExportError};

/// Evaluation result as persisted to disk, with the keywords it was scored
/// against and a timestamp.
#[derive(Debug, Serialize)]
pub struct EvaluationReport<'a> {
    #[serde(flatten)]
    pub evaluation: &'a EvaluationResult,
    pub keywords: &'a [String],
    pub generated_at: DateTime<Utc>,
}

impl<'a> EvaluationReport<'a> {
    pub fn new(evaluation: &'a EvaluationResult, keywords: &'a [String]) -> Self {
        Self {
            evaluation,
            keywords,
            generated_at: Utc::now(),
        }
    }
}

/// Writes any serializable value as pretty JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf, ExportError> {
    let resolved = prepare_output_path(path)?;
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(&resolved, json).map_err(|source| ExportError::Io {
        path: resolved.clone(),
        source,
    })?;
    Ok(resolved)
}

pub fn write_evaluation_report(
    path: &Path,
    evaluation: &EvaluationResult,
    keywords: &[String],
) -> Result<PathBuf, ExportError> {
    let written = write_json(path, &EvaluationReport::new(evaluation, keywords))?;
    info!("Saved evaluation report to {}", written.display());
    Ok(written)
}

/// Plain-text rendering of an evaluation for terminal output.
pub fn render_text_report(evaluation: &EvaluationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "SEO score: {}/100", evaluation.total_score);
    let _ = writeln!(out);

    for (metric, score) in &evaluation.metrics {
        let raw = score
            .raw_value
            .map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        let _ = writeln!(
            out,
            "  {:<18} raw {:>8}   score {:>3}",
            metric.label(),
            raw,
            score.score
        );
    }
    let _ = writeln!(out);

    if evaluation.recommendations.is_empty() {
        let _ = writeln!(out, "Content meets all key SEO checks.");
    } else {
        let _ = writeln!(out, "Recommendations:");
        for recommendation in &evaluation.recommendations {
            let _ = writeln!(out, "  - {recommendation}");
        }
    }
    out
}
