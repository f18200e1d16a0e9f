//! Article generation: turns keywords plus site context into a structured `Article`.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::generation::prompts::{ARTICLE_GENERATION_PROMPT_TEMPLATE, ARTICLE_GENERATION_ROLE};
use crate::generation::{classify, GenerationError};
use crate::llm_client::prompts::json_system_prompt;
use crate::llm_client::{call_json, ChatMessage, CompletionGateway};
use crate::models::{Article, KeywordSet};

const REQUIRED_FIELDS: [&str; 4] = ["title", "body", "summary", "meta_description"];
const NO_DESCRIPTION: &str = "No additional description provided.";

/// Inputs for one generation call. `tone` and `length` are free-form guidance.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topic_context: Option<String>,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_length")]
    pub length: String,
}

fn default_tone() -> String {
    "Professional".to_string()
}

fn default_length() -> String {
    "Medium".to_string()
}

impl GenerationRequest {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            description: None,
            topic_context: None,
            tone: default_tone(),
            length: default_length(),
        }
    }

    fn build_prompt(&self, keywords: &KeywordSet) -> String {
        let description = self
            .description
            .as_deref()
            .or(self.topic_context.as_deref())
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION);

        // Only mention the topic context separately when it adds something.
        let context_note = match self.topic_context.as_deref() {
            Some(ctx) if !ctx.trim().is_empty() && ctx != description => {
                format!("Additional context: {ctx}\n")
            }
            _ => String::new(),
        };

        ARTICLE_GENERATION_PROMPT_TEMPLATE
            .replace("{description}", description)
            .replace("{context_note}", &context_note)
            .replace("{keywords}", &keywords.joined())
            .replace("{tone}", &self.tone)
            .replace("{length}", &self.length)
    }
}

/// Generates an article that works the requested keywords in naturally.
pub async fn generate_article(
    gateway: &dyn CompletionGateway,
    request: &GenerationRequest,
) -> Result<Article, GenerationError> {
    let keywords = KeywordSet::new(&request.keywords);
    if keywords.is_empty() {
        return Err(GenerationError::NoKeywords);
    }

    let messages = [
        ChatMessage::system(json_system_prompt(ARTICLE_GENERATION_ROLE)),
        ChatMessage::user(request.build_prompt(&keywords)),
    ];

    let raw: Value = call_json(gateway, &messages).await.map_err(classify)?;
    let article = parse_article_payload(&raw)?;

    info!("Generated article: {}", article.title);
    Ok(article)
}

fn parse_article_payload(raw: &Value) -> Result<Article, GenerationError> {
    let object = raw.as_object().ok_or_else(|| {
        GenerationError::UnexpectedShape("expected a JSON object".to_string())
    })?;

    let field = |name: &str| -> Option<String> {
        let text = match object.get(name)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    };

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|name| field(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(GenerationError::MissingFields(missing));
    }

    // Presence was checked above.
    let take = |name: &str| field(name).unwrap_or_default();
    Ok(Article::new(take("title"), take("body"))
        .with_summary(take("summary"))
        .with_meta_description(take("meta_description")))
}
