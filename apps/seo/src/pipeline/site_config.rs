use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

const REQUIRED_FIELDS: [&str; 5] = [
    "content_category",
    "content_settings",
    "content_type",
    "seo_preferences",
    "website_description",
];

#[derive(Debug, Error)]
pub enum SiteConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Root of configuration file must be a JSON object")]
    NotAnObject,

    #[error("Missing configuration fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("{0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoPreferences {
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSettings {
    pub tone: String,
    /// Target article length in words.
    pub length: u32,
}

/// Site-level settings that drive a pipeline run (`config.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub website_description: String,
    pub content_category: String,
    pub content_type: String,
    pub seo_preferences: SeoPreferences,
    pub content_settings: ContentSettings,
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self, SiteConfigError> {
        if !path.exists() {
            return Err(SiteConfigError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| SiteConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(serde_json::from_str(&raw)?)
    }

    /// Validates a parsed document. All missing top-level fields are reported
    /// together, in alphabetical order.
    pub fn from_value(value: Value) -> Result<Self, SiteConfigError> {
        let Value::Object(root) = value else {
            return Err(SiteConfigError::NotAnObject);
        };

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !root.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SiteConfigError::MissingFields(missing));
        }

        let seo = object(&root, "seo_preferences", "seo_preferences must be an object")?;
        let keywords = seo
            .get("keywords")
            .and_then(Value::as_array)
            .and_then(|items| {
                items
                    .iter()
                    .map(|k| k.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .ok_or(SiteConfigError::Invalid(
                "seo_preferences.keywords must be a list of strings",
            ))?;

        let settings = object(&root, "content_settings", "content_settings must be an object")?;
        let tone = settings
            .get("tone")
            .and_then(Value::as_str)
            .ok_or(SiteConfigError::Invalid("content_settings.tone must be a string"))?;
        let length = settings
            .get("length")
            .and_then(Value::as_u64)
            .filter(|n| *n > 0)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(SiteConfigError::Invalid(
                "content_settings.length must be a positive integer",
            ))?;

        Ok(SiteConfig {
            website_description: text(&root["website_description"]),
            content_category: text(&root["content_category"]),
            content_type: text(&root["content_type"]),
            seo_preferences: SeoPreferences { keywords },
            content_settings: ContentSettings {
                tone: tone.to_string(),
                length,
            },
        })
    }

    /// Word count as passed to the generator; the prompt supplies the unit.
    pub fn length_guidance(&self) -> String {
        self.content_settings.length.to_string()
    }
}

fn object<'a>(
    root: &'a Map<String, Value>,
    key: &str,
    message: &'static str,
) -> Result<&'a Map<String, Value>, SiteConfigError> {
    root.get(key)
        .and_then(Value::as_object)
        .ok_or(SiteConfigError::Invalid(message))
}

/// Scalars are accepted for the free-text fields and stringified.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "website_description": "An online store for eco-friendly home goods",
            "content_category": "Sustainability",
            "content_type": "Blog post",
            "seo_preferences": { "keywords": ["eco-friendly", "zero waste"] },
            "content_settings": { "tone": "Friendly", "length": 1200 }
        })
    }

    #[test]
    fn test_from_value_parses_valid_config() {
        let config = SiteConfig::from_value(valid()).unwrap();
        assert_eq!(config.content_category, "Sustainability");
        assert_eq!(config.seo_preferences.keywords, vec!["eco-friendly", "zero waste"]);
        assert_eq!(config.content_settings.length, 1200);
        assert_eq!(config.length_guidance(), "1200");
    }

    #[test]
    fn test_missing_fields_reported_together_sorted() {
        let err = SiteConfig::from_value(json!({ "content_type": "Blog" })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing configuration fields: content_category, content_settings, \
             seo_preferences, website_description"
        );
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(matches!(
            SiteConfig::from_value(json!([1, 2])),
            Err(SiteConfigError::NotAnObject)
        ));
    }

    #[test]
    fn test_rejects_non_string_keywords() {
        let mut value = valid();
        value["seo_preferences"]["keywords"] = json!(["ok", 3]);
        let err = SiteConfig::from_value(value).unwrap_err();
        assert!(err.to_string().contains("keywords must be a list of strings"));
    }

    #[test]
    fn test_rejects_non_positive_length() {
        for bad in [json!(0), json!(-5), json!("long"), json!(2.5)] {
            let mut value = valid();
            value["content_settings"]["length"] = bad;
            let err = SiteConfig::from_value(value).unwrap_err();
            assert!(err.to_string().contains("positive integer"));
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = SiteConfig::load(Path::new("/no/such/config.json")).unwrap_err();
        assert!(matches!(err, SiteConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, valid().to_string()).unwrap();
        assert_eq!(SiteConfig::load(&path).unwrap().content_settings.tone, "Friendly");
    }
}
