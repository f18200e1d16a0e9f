//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::{extract_keywords, generate_article, GenerationRequest, DEFAULT_MAX_KEYWORDS};
use crate::models::Article;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub description: String,
    #[serde(default)]
    pub max_keywords: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub article: Article,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/keywords
///
/// Extracts SEO keywords from a website description.
pub async fn handle_extract_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("description cannot be empty".to_string()));
    }
    let max_keywords = request.max_keywords.unwrap_or(DEFAULT_MAX_KEYWORDS);
    if max_keywords == 0 {
        return Err(AppError::Validation("max_keywords must be at least 1".to_string()));
    }

    let gateway = state.gateway()?;
    let keywords = extract_keywords(gateway.as_ref(), &request.description, max_keywords).await?;

    Ok(Json(KeywordsResponse { keywords }))
}

/// POST /api/v1/articles
///
/// Generates an article for the given keywords. Tone and length default to
/// "Professional" and "Medium".
pub async fn handle_generate_article(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<ArticleResponse>, AppError> {
    let gateway = state.gateway()?;
    let article = generate_article(gateway.as_ref(), &request).await?;

    Ok(Json(ArticleResponse { article }))
}
