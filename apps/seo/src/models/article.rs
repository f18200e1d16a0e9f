use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A generated or hand-written article, as produced by the generator or read
/// from a content JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// Markdown body. The only input for density, coverage and readability.
    pub body: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, alias = "metaDescription")]
    pub meta_description: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            summary: None,
            meta_description: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_meta_description(mut self, meta: impl Into<String>) -> Self {
        self.meta_description = Some(meta.into());
        self
    }

    /// The meta description, trimmed. `None` when absent or blank.
    pub fn meta_description(&self) -> Option<&str> {
        self.meta_description
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Loads an article from a content JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Content file not found: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Content JSON is malformed: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_meta_description_blank_is_none() {
        let article = Article::new("T", "body").with_meta_description("   ");
        assert_eq!(article.meta_description(), None);
    }

    #[test]
    fn test_meta_description_is_trimmed() {
        let article = Article::new("T", "body").with_meta_description("  Short meta. ");
        assert_eq!(article.meta_description(), Some("Short meta."));
    }

    #[test]
    fn test_deserializes_with_optional_fields_missing() {
        let json = r##"{"title": "Hello", "body": "# Hello\n\nWorld."}"##;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Hello");
        assert!(article.summary.is_none());
        assert!(article.meta_description.is_none());
    }

    #[test]
    fn test_accepts_camel_case_meta_description() {
        let json = r#"{"title": "T", "body": "b", "metaDescription": "Meta"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.meta_description(), Some("Meta"));
    }

    #[test]
    fn test_from_json_file_reads_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"title": "T", "body": "Body text.", "summary": "S", "meta_description": "M"}}"#
        )
        .unwrap();

        let article = Article::from_json_file(file.path()).unwrap();
        assert_eq!(article.summary.as_deref(), Some("S"));
        assert_eq!(article.meta_description(), Some("M"));
    }

    #[test]
    fn test_from_json_file_missing_file_errors() {
        let err = Article::from_json_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Content file not found"));
    }
}
