//! Keyword extraction: asks the model for SEO keywords for a website description.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::generation::prompts::{KEYWORD_EXTRACTION_PROMPT_TEMPLATE, KEYWORD_EXTRACTION_ROLE};
use crate::generation::{classify, GenerationError};
use crate::llm_client::prompts::json_system_prompt;
use crate::llm_client::{strip_json_fences, ChatMessage, CompletionGateway, ResponseFormat};

pub const DEFAULT_MAX_KEYWORDS: usize = 12;

/// Models answer either with a bare array or wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeywordPayload {
    List(Vec<String>),
    Wrapped { keywords: Vec<String> },
}

/// Extracts up to `max_keywords` keywords, in the model's ranking order.
pub async fn extract_keywords(
    gateway: &dyn CompletionGateway,
    description: &str,
    max_keywords: usize,
) -> Result<Vec<String>, GenerationError> {
    if description.trim().is_empty() {
        return Err(GenerationError::EmptyDescription);
    }

    let prompt = KEYWORD_EXTRACTION_PROMPT_TEMPLATE
        .replace("{description}", description.trim())
        .replace("{max_keywords}", &max_keywords.to_string());
    let messages = [
        ChatMessage::system(json_system_prompt(KEYWORD_EXTRACTION_ROLE)),
        ChatMessage::user(prompt),
    ];

    // Bare JSON array expected; JSON-object mode cannot return one.
    let text = gateway
        .complete(&messages, ResponseFormat::Text)
        .await
        .map_err(classify)?;
    let raw: Value =
        serde_json::from_str(strip_json_fences(&text)).map_err(GenerationError::InvalidJson)?;
    let keywords = parse_keyword_payload(raw, max_keywords)?;

    info!("Extracted {} keywords", keywords.len());
    Ok(keywords)
}

fn parse_keyword_payload(raw: Value, max_keywords: usize) -> Result<Vec<String>, GenerationError> {
    let payload: KeywordPayload = serde_json::from_value(raw).map_err(|_| {
        GenerationError::UnexpectedShape(
            "expected a list of keyword strings or {\"keywords\": [...]}".to_string(),
        )
    })?;

    let keywords = match payload {
        KeywordPayload::List(list) | KeywordPayload::Wrapped { keywords: list } => list,
    };

    let cleaned: Vec<String> = keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .take(max_keywords)
        .collect();

    if cleaned.is_empty() {
        return Err(GenerationError::NoKeywordsExtracted);
    }
    Ok(cleaned)
}
