//! Pipeline orchestration: runs the steps of a `commands.json` file in order
//! against a shared `PipelineState`.
//!
//! The language model gateway is created lazily on the first step that needs
//! it and reused for the rest of the run.

pub mod commands;
pub mod site_config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::evaluation::{evaluate_keyword_set, EvaluationError, EvaluationResult};
use crate::export::{export_article_csv, write_evaluation_report, write_json, ExportError};
use crate::generation::{extract_keywords, generate_article, GenerationError, GenerationRequest};
use crate::llm_client::CompletionGateway;
use crate::models::{Article, KeywordSet};

pub use commands::{CommandFile, Step};
pub use site_config::{SiteConfig, SiteConfigError};

/// Builds the gateway on demand. Credential loading happens inside.
pub type Connect<'a> = &'a (dyn Fn() -> anyhow::Result<Arc<dyn CompletionGateway>> + Sync);

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to load command file: {0:#}")]
    Commands(anyhow::Error),

    #[error("{0}")]
    Precondition(&'static str),

    #[error(transparent)]
    Config(#[from] SiteConfigError),

    #[error("Failed to connect to the language model: {0:#}")]
    Connect(anyhow::Error),

    #[error("Keyword extraction failed: {0}")]
    KeywordExtraction(#[source] GenerationError),

    #[error("Content generation failed: {0}")]
    Generation(#[source] GenerationError),

    #[error("SEO evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Everything produced so far in a run.
#[derive(Default)]
pub struct PipelineState {
    pub config: Option<SiteConfig>,
    pub keywords: Option<Vec<String>>,
    pub content: Option<Article>,
    pub evaluation: Option<EvaluationResult>,
    pub content_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    gateway: Option<Arc<dyn CompletionGateway>>,
}

impl PipelineState {
    fn config(&self, message: &'static str) -> Result<&SiteConfig, PipelineError> {
        self.config.as_ref().ok_or(PipelineError::Precondition(message))
    }

    /// Extracted keywords when present, otherwise the site config's keywords.
    fn active_keywords(&self, config: &SiteConfig, message: &'static str) -> Result<KeywordSet, PipelineError> {
        let source = match &self.keywords {
            Some(extracted) if !extracted.is_empty() => extracted,
            _ => &config.seo_preferences.keywords,
        };
        let keywords = KeywordSet::new(source);
        if keywords.is_empty() {
            return Err(PipelineError::Precondition(message));
        }
        Ok(keywords)
    }

    fn gateway(&mut self, connect: Connect<'_>) -> Result<Arc<dyn CompletionGateway>, PipelineError> {
        if let Some(gateway) = &self.gateway {
            return Ok(Arc::clone(gateway));
        }
        let gateway = connect().map_err(PipelineError::Connect)?;
        self.gateway = Some(Arc::clone(&gateway));
        Ok(gateway)
    }
}

/// Files and score produced by a completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineSummary {
    pub steps_run: usize,
    pub total_score: Option<u8>,
    pub content_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
}

pub async fn run_pipeline(
    commands_path: &Path,
    connect: Connect<'_>,
) -> Result<PipelineSummary, PipelineError> {
    let commands = CommandFile::load(commands_path).map_err(PipelineError::Commands)?;
    run_steps(&commands.steps, connect).await
}

pub async fn run_steps(steps: &[Step], connect: Connect<'_>) -> Result<PipelineSummary, PipelineError> {
    let mut state = PipelineState::default();

    for (index, step) in steps.iter().enumerate() {
        info!("Step {}/{} → {}", index + 1, steps.len(), step.title());
        run_step(step, &mut state, connect).await?;
    }

    let summary = PipelineSummary {
        steps_run: steps.len(),
        total_score: state.evaluation.as_ref().map(|e| e.total_score),
        content_path: state.content_path,
        report_path: state.report_path,
        csv_path: state.csv_path,
    };
    info!(
        steps = summary.steps_run,
        score = ?summary.total_score,
        "Pipeline completed all steps successfully"
    );
    Ok(summary)
}

async fn run_step(step: &Step, state: &mut PipelineState, connect: Connect<'_>) -> Result<(), PipelineError> {
    match step {
        Step::LoadConfig { config_path } => {
            let config = SiteConfig::load(config_path)?;
            info!(
                tone = %config.content_settings.tone,
                length = config.content_settings.length,
                "Loaded configuration from {}",
                config_path.display()
            );
            state.config = Some(config);
        }

        Step::ExtractKeywords {
            max_keywords,
            fallback_to_config_keywords,
        } => {
            let description = state
                .config("Configuration must be loaded before extracting keywords.")?
                .website_description
                .clone();
            let gateway = state.gateway(connect)?;

            let keywords = match extract_keywords(gateway.as_ref(), &description, *max_keywords).await {
                Ok(keywords) => {
                    info!("Extracted {} keywords via LLM", keywords.len());
                    keywords
                }
                Err(e) if *fallback_to_config_keywords => {
                    warn!("Keyword extraction failed; falling back to config keywords: {e}");
                    state
                        .config("Configuration must be loaded before extracting keywords.")?
                        .seo_preferences
                        .keywords
                        .clone()
                }
                Err(e) => return Err(PipelineError::KeywordExtraction(e)),
            };
            state.keywords = Some(keywords);
        }

        Step::GenerateContent {
            tone,
            length,
            topic_context,
            output_content_path,
        } => {
            let config = state.config("Configuration must be loaded before content generation.")?;
            let keywords =
                state.active_keywords(config, "No keywords available for content generation.")?;

            let request = GenerationRequest {
                keywords: keywords.keywords().to_vec(),
                description: Some(config.website_description.clone()),
                topic_context: Some(
                    topic_context
                        .clone()
                        .unwrap_or_else(|| config.content_category.clone()),
                ),
                tone: tone.clone().unwrap_or_else(|| config.content_settings.tone.clone()),
                length: length.clone().unwrap_or_else(|| config.length_guidance()),
            };

            let gateway = state.gateway(connect)?;
            let article = generate_article(gateway.as_ref(), &request)
                .await
                .map_err(PipelineError::Generation)?;
            info!("Generated content with title: {}", article.title);

            if let Some(path) = output_content_path {
                let written = write_json(path, &article)?;
                info!("Saved generated content to {}", written.display());
                state.content_path = Some(written);
            }
            state.content = Some(article);
        }

        Step::EvaluateContent {
            primary_keyword,
            output_report_path,
        } => {
            const MESSAGE: &str = "Content and configuration must be available before evaluation.";
            let config = state.config(MESSAGE)?;
            let content = state.content.as_ref().ok_or(PipelineError::Precondition(MESSAGE))?;
            let keywords = state
                .active_keywords(config, "No keywords available for evaluation.")?
                .with_primary(primary_keyword.as_deref());

            let evaluation = evaluate_keyword_set(content, &keywords)?;
            info!("Evaluation score: {}/100", evaluation.total_score);

            if let Some(path) = output_report_path {
                state.report_path = Some(write_evaluation_report(path, &evaluation, keywords.keywords())?);
            }
            state.evaluation = Some(evaluation);
        }

        Step::ExportCsv {
            output_csv_path,
            category,
        } => {
            const MESSAGE: &str = "Content and configuration must be available before exporting.";
            let config = state.config(MESSAGE)?;
            let content = state.content.as_ref().ok_or(PipelineError::Precondition(MESSAGE))?;
            let keywords = state.active_keywords(config, "No keywords available for export.")?;
            let category = category.as_deref().unwrap_or(&config.content_category);

            state.csv_path = Some(export_article_csv(content, &keywords, output_csv_path, Some(category))?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubGateway;
    use serde_json::json;

    const ARTICLE_REPLY: &str = r##"{
        "title": "Zero Waste Living Guide",
        "body": "# Zero Waste Living Guide\n\nZero waste living starts at home.\n\n## Why it matters\nLess waste helps everyone.",
        "summary": "A short guide.",
        "meta_description": "Learn zero waste living with practical steps for every room of your home."
    }"##;

    fn write_config(dir: &Path) -> PathBuf {
        let path = dir.join("config.json");
        let config = json!({
            "website_description": "An online store for eco-friendly home goods",
            "content_category": "Sustainability",
            "content_type": "Blog post",
            "seo_preferences": { "keywords": ["zero waste", "eco-friendly"] },
            "content_settings": { "tone": "Friendly", "length": 800 }
        });
        std::fs::write(&path, config.to_string()).unwrap();
        path
    }

    fn connect_to(stub: Arc<StubGateway>) -> impl Fn() -> anyhow::Result<Arc<dyn CompletionGateway>> + Sync {
        move || Ok(Arc::clone(&stub) as Arc<dyn CompletionGateway>)
    }

    fn never_connect() -> anyhow::Result<Arc<dyn CompletionGateway>> {
        anyhow::bail!("no credentials in tests")
    }

    #[tokio::test]
    async fn test_full_run_produces_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path());
        let stub = Arc::new(StubGateway::with_replies([
            r#"{"keywords": ["zero waste living", "eco-friendly"]}"#,
            ARTICLE_REPLY,
        ]));
        let connect = connect_to(Arc::clone(&stub));

        let steps = vec![
            Step::LoadConfig { config_path },
            Step::ExtractKeywords {
                max_keywords: 5,
                fallback_to_config_keywords: false,
            },
            Step::GenerateContent {
                tone: None,
                length: None,
                topic_context: None,
                output_content_path: Some(dir.path().join("out/content.json")),
            },
            Step::EvaluateContent {
                primary_keyword: None,
                output_report_path: Some(dir.path().join("out/report.json")),
            },
            Step::ExportCsv {
                output_csv_path: dir.path().join("out/article.csv"),
                category: None,
            },
        ];

        let summary = run_steps(&steps, &connect).await.unwrap();

        assert_eq!(summary.steps_run, 5);
        assert!(summary.total_score.is_some());
        assert!(summary.content_path.unwrap().exists());
        assert!(summary.report_path.unwrap().exists());
        let csv = std::fs::read_to_string(summary.csv_path.unwrap()).unwrap();
        assert!(csv.contains("\"zero waste living, eco-friendly\",Sustainability\r\n"));

        // One gateway shared by both model steps.
        assert_eq!(stub.call_count(), 2);
        let calls = stub.calls.lock().unwrap();
        let prompt = &calls[1].0[1].content;
        assert!(prompt.contains("Friendly"));
        assert!(prompt.contains("Target length guidance: 800 words\n"));
        assert!(!prompt.contains("words words"));
        assert!(prompt.contains("Additional context: Sustainability"));
    }

    #[tokio::test]
    async fn test_keyword_fallback_uses_config_keywords() {
        let dir = tempfile::tempdir().unwrap();
        let stub = Arc::new(StubGateway::failing());
        let connect = connect_to(stub);

        let steps = vec![
            Step::LoadConfig {
                config_path: write_config(dir.path()),
            },
            Step::ExtractKeywords {
                max_keywords: 12,
                fallback_to_config_keywords: true,
            },
        ];
        assert!(run_steps(&steps, &connect).await.is_ok());
    }

    #[tokio::test]
    async fn test_keyword_failure_without_fallback_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let connect = connect_to(Arc::new(StubGateway::failing()));

        let steps = vec![
            Step::LoadConfig {
                config_path: write_config(dir.path()),
            },
            Step::ExtractKeywords {
                max_keywords: 12,
                fallback_to_config_keywords: false,
            },
        ];
        let err = run_steps(&steps, &connect).await.unwrap_err();
        assert!(matches!(err, PipelineError::KeywordExtraction(_)));
    }

    #[tokio::test]
    async fn test_steps_require_loaded_config() {
        let steps = vec![Step::ExtractKeywords {
            max_keywords: 12,
            fallback_to_config_keywords: false,
        }];
        let err = run_steps(&steps, &never_connect).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration must be loaded before extracting keywords."
        );
    }

    #[tokio::test]
    async fn test_evaluate_requires_content() {
        let dir = tempfile::tempdir().unwrap();
        let steps = vec![
            Step::LoadConfig {
                config_path: write_config(dir.path()),
            },
            Step::EvaluateContent {
                primary_keyword: None,
                output_report_path: None,
            },
        ];
        let err = run_steps(&steps, &never_connect).await.unwrap_err();
        assert!(matches!(err, PipelineError::Precondition(_)));
    }

    #[tokio::test]
    async fn test_connect_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let steps = vec![
            Step::LoadConfig {
                config_path: write_config(dir.path()),
            },
            Step::GenerateContent {
                tone: None,
                length: None,
                topic_context: None,
                output_content_path: None,
            },
        ];
        let err = run_steps(&steps, &never_connect).await.unwrap_err();
        assert!(err.to_string().contains("no credentials in tests"));
    }

    #[tokio::test]
    async fn test_run_pipeline_reads_command_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path());
        let commands_path = dir.path().join("commands.json");
        let commands = json!({
            "steps": [{ "operation": "load_config", "config_path": config_path }]
        });
        std::fs::write(&commands_path, commands.to_string()).unwrap();

        let summary = run_pipeline(&commands_path, &never_connect).await.unwrap();
        assert_eq!(summary.steps_run, 1);
        assert_eq!(summary.total_score, None);
    }

    #[tokio::test]
    async fn test_run_pipeline_missing_command_file() {
        let err = run_pipeline(Path::new("/no/such/commands.json"), &never_connect)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Commands(_)));
    }
}
