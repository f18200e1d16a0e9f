//! Step definitions for `commands.json`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::generation::DEFAULT_MAX_KEYWORDS;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Step {
    LoadConfig {
        #[serde(default = "default_config_path")]
        config_path: PathBuf,
    },
    ExtractKeywords {
        #[serde(default = "default_max_keywords")]
        max_keywords: usize,
        #[serde(default)]
        fallback_to_config_keywords: bool,
    },
    GenerateContent {
        #[serde(default)]
        tone: Option<String>,
        #[serde(default)]
        length: Option<String>,
        #[serde(default)]
        topic_context: Option<String>,
        #[serde(default)]
        output_content_path: Option<PathBuf>,
    },
    EvaluateContent {
        #[serde(default)]
        primary_keyword: Option<String>,
        #[serde(default)]
        output_report_path: Option<PathBuf>,
    },
    ExportCsv {
        #[serde(default = "default_csv_path")]
        output_csv_path: PathBuf,
        #[serde(default)]
        category: Option<String>,
    },
}

fn default_config_path() -> PathBuf {
    PathBuf::from("config.json")
}

fn default_max_keywords() -> usize {
    DEFAULT_MAX_KEYWORDS
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("output/article.csv")
}

impl Step {
    pub fn operation(&self) -> &'static str {
        match self {
            Step::LoadConfig { .. } => "load_config",
            Step::ExtractKeywords { .. } => "extract_keywords",
            Step::GenerateContent { .. } => "generate_content",
            Step::EvaluateContent { .. } => "evaluate_content",
            Step::ExportCsv { .. } => "export_csv",
        }
    }

    /// "Extract Keywords" style label for progress logs.
    pub fn title(&self) -> String {
        self.operation()
            .split('_')
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandFile {
    pub steps: Vec<Step>,
}

impl CommandFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Command definition file not found: {}", path.display()))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .context("commands.json must contain a top-level 'steps' array of known operations")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_applies_defaults() {
        let file = CommandFile::parse(
            r#"{"steps": [
                {"operation": "load_config"},
                {"operation": "extract_keywords"},
                {"operation": "export_csv"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            file.steps,
            vec![
                Step::LoadConfig {
                    config_path: PathBuf::from("config.json")
                },
                Step::ExtractKeywords {
                    max_keywords: 12,
                    fallback_to_config_keywords: false
                },
                Step::ExportCsv {
                    output_csv_path: PathBuf::from("output/article.csv"),
                    category: None
                },
            ]
        );
    }

    #[test]
    fn test_parse_explicit_options() {
        let file = CommandFile::parse(
            r#"{"steps": [{"operation": "generate_content", "tone": "Witty",
                "output_content_path": "output/content.json"}]}"#,
        )
        .unwrap();
        match &file.steps[0] {
            Step::GenerateContent {
                tone,
                output_content_path,
                length,
                ..
            } => {
                assert_eq!(tone.as_deref(), Some("Witty"));
                assert_eq!(output_content_path.as_deref(), Some(Path::new("output/content.json")));
                assert!(length.is_none());
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_operation_fails_at_parse_time() {
        assert!(CommandFile::parse(r#"{"steps": [{"operation": "publish"}]}"#).is_err());
        assert!(CommandFile::parse(r#"{"steps": [{"max_keywords": 3}]}"#).is_err());
        assert!(CommandFile::parse(r#"{"stages": []}"#).is_err());
    }

    #[test]
    fn test_step_title() {
        let step = Step::EvaluateContent {
            primary_keyword: None,
            output_report_path: None,
        };
        assert_eq!(step.title(), "Evaluate Content");
    }
}
