use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

pub const DEFAULT_ENV_PATH: &str = ".env";
pub const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";

const API_KEY_CANDIDATES: &[&str] = &["OPENROUTER_API_KEY", "API_KEY", "api_key", "API-KEY", "api-key"];
const MODEL_CANDIDATES: &[&str] = &["OPENROUTER_MODEL", "LLM_MODEL", "LLM-model", "MODEL"];

/// Process configuration loaded from environment variables (and `.env`).
/// Everything here has a default; credentials are loaded separately and only
/// by the commands that talk to the model.
#[derive(Debug, Clone)]
pub struct Config {
    pub env_path: PathBuf,
    pub llm_base_url: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            env_path: PathBuf::from(
                std::env::var("SEO_ENV_FILE").unwrap_or_else(|_| DEFAULT_ENV_PATH.to_string()),
            ),
            llm_base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string()),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// API key and model name for the language model provider.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &mask_secret(&self.api_key, 4))
            .field("model", &self.model)
            .finish()
    }
}

impl Credentials {
    /// Resolves credentials from the process environment first, then the
    /// given `.env` file. Several spellings of each key are accepted.
    pub fn load(env_path: &Path) -> Result<Self> {
        let file_vars = read_env_file(env_path);
        let lookup = |key: &str| std::env::var(key).ok();

        Ok(Credentials {
            api_key: resolve(API_KEY_CANDIDATES, lookup, &file_vars)?,
            model: resolve(MODEL_CANDIDATES, lookup, &file_vars)?,
        })
    }
}

/// Upper-cases a key and replaces `-` with `_`.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_uppercase().replace('-', "_")
}

/// Reads a `.env` file into a map holding both the original and normalised
/// spelling of every key. A missing or unreadable file yields an empty map.
fn read_env_file(path: &Path) -> HashMap<String, String> {
    let Ok(iter) = dotenvy::from_path_iter(path) else {
        return HashMap::new();
    };

    let mut vars = HashMap::new();
    for (key, value) in iter.flatten() {
        vars.insert(normalize_key(&key), value.clone());
        vars.insert(key, value);
    }
    vars
}

fn resolve<F>(candidates: &[&str], lookup: F, file_vars: &HashMap<String, String>) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    for candidate in candidates {
        let normalized = normalize_key(candidate);
        let found = lookup(candidate)
            .filter(|v| !v.is_empty())
            .or_else(|| lookup(&normalized).filter(|v| !v.is_empty()))
            .or_else(|| file_vars.get(*candidate).filter(|v| !v.is_empty()).cloned())
            .or_else(|| file_vars.get(&normalized).filter(|v| !v.is_empty()).cloned());
        if let Some(value) = found {
            return Ok(value);
        }
    }
    bail!(
        "Missing required environment variable. Tried: {}",
        candidates.join(", ")
    )
}

/// Masks a secret for logging: `abcd...wxyz`, or all stars when short.
pub fn mask_secret(secret: &str, visible: usize) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= visible * 2 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..visible].iter().collect();
    let tail: String = chars[chars.len() - visible..].iter().collect();
    format!("{head}...{tail}")
}
