// Keyword extraction and article generation on top of the LLM gateway.
// All model calls go through llm_client; nothing here speaks HTTP.

pub mod article;
pub mod handlers;
pub mod keywords;
pub mod prompts;

use thiserror::Error;

use crate::llm_client::LlmError;

pub use article::{generate_article, GenerationRequest};
pub use keywords::{extract_keywords, DEFAULT_MAX_KEYWORDS};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Website description must not be empty")]
    EmptyDescription,

    #[error("At least one keyword is required to generate content")]
    NoKeywords,

    #[error("No keywords extracted from the model response")]
    NoKeywordsExtracted,

    #[error("Model returned invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Model response did not match the expected shape: {0}")]
    UnexpectedShape(String),

    #[error("Model response missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Keeps JSON parse failures distinct from transport failures.
pub(crate) fn classify(err: LlmError) -> GenerationError {
    match err {
        LlmError::Parse(e) => GenerationError::InvalidJson(e),
        other => GenerationError::Llm(other),
    }
}
