//! Handlers for scoring and exporting caller-supplied articles. Neither
//! needs the language model.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::evaluation::{evaluate, EvaluationResult};
use crate::export::write_article_csv;
use crate::models::{Article, KeywordSet};

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub article: Article,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub primary_keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub article: Article,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// POST /api/v1/evaluate
pub async fn handle_evaluate(
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    let result = evaluate(
        &request.article,
        &request.keywords,
        request.primary_keyword.as_deref(),
    )?;
    Ok(Json(result))
}

/// POST /api/v1/export
///
/// Returns the CMS import CSV as an attachment.
pub async fn handle_export(
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let keywords = KeywordSet::new(&request.keywords);
    let mut csv = Vec::new();
    write_article_csv(&mut csv, &request.article, &keywords, request.category.as_deref())?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"article.csv\""),
        ],
        csv,
    )
        .into_response())
}
