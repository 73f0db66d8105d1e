use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// Which extraction backend turns an uploaded document into `ExtractedFields`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractorBackend {
    #[default]
    Heuristic,
    Llm,
}

impl FromStr for ExtractorBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(ExtractorBackend::Heuristic),
            "llm" => Ok(ExtractorBackend::Llm),
            other => Err(anyhow!(
                "EXTRACTOR must be 'heuristic' or 'llm', got '{other}'"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default except `ANTHROPIC_API_KEY`, which is only
/// required when the LLM extractor is selected.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub extractor: ExtractorBackend,
    pub anthropic_api_key: Option<String>,
    /// Overrides the Messages endpoint used by the LLM extractor.
    pub anthropic_api_url: Option<String>,
    pub catalog_path: Option<PathBuf>,
    /// `None` disables the request body limit entirely.
    pub max_upload_bytes: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let extractor = optional_env("EXTRACTOR")
            .map(|v| v.parse::<ExtractorBackend>())
            .transpose()?
            .unwrap_or_default();

        let anthropic_api_key = match extractor {
            ExtractorBackend::Llm => Some(require_env("ANTHROPIC_API_KEY")?),
            ExtractorBackend::Heuristic => optional_env("ANTHROPIC_API_KEY"),
        };

        Ok(Config {
            database_url: optional_env("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://sra.db".to_string()),
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            extractor,
            anthropic_api_key,
            anthropic_api_url: optional_env("ANTHROPIC_API_URL"),
            catalog_path: optional_env("CATALOG_PATH").map(PathBuf::from),
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads a variable, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
