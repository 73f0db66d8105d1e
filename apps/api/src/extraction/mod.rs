//! Extraction — turns an uploaded resume document into structured fields.
//!
//! Backends implement `ResumeExtractor`. `AppState` holds an
//! `Arc<dyn ResumeExtractor>` chosen at startup from `EXTRACTOR`:
//! - `HeuristicExtractor` (default): regex + skills vocabulary, no network.
//! - `LlmExtractor`: sends the document text to Claude and reads back JSON.

pub mod document;
pub mod heuristic;
pub mod llm;
pub mod prompts;
pub mod vocabulary;

#[cfg(test)]
pub mod test_support;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::config::{Config, ExtractorBackend};
use crate::llm_client::LlmClient;

pub use heuristic::HeuristicExtractor;
pub use llm::LlmExtractor;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Structured fields pulled out of a single resume. Transient: only the
/// name, email, mobile number and derived score are ever persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub degree: Vec<String>,
    #[serde(default)]
    pub college_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_names: Vec<String>,
    #[serde(default)]
    pub designation: Option<String>,
    /// Years, fractional.
    #[serde(default)]
    pub total_experience: Option<f64>,
}

impl ExtractedFields {
    /// True when the backend found nothing at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.mobile_number.is_none()
            && self.degree.is_empty()
            && self.college_name.is_none()
            && self.experience.is_empty()
            && self.skills.is_empty()
            && self.company_names.is_empty()
            && self.designation.is_none()
            && self.total_experience.is_none()
    }

    /// Collapses an all-empty result into `ExtractionOutcome::Empty`.
    pub fn into_outcome(self) -> ExtractionOutcome {
        if self.is_empty() {
            ExtractionOutcome::Empty
        } else {
            ExtractionOutcome::Extracted(self)
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result of a completed extraction call. Failures are `ExtractionError`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Extracted(ExtractedFields),
    Empty,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document format '{0}'")]
    UnsupportedFormat(String),

    #[error("could not read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse PDF: {0}")]
    Pdf(String),

    #[error("could not parse DOCX: {0}")]
    Docx(String),

    #[error("extraction backend failed: {0}")]
    Backend(String),
}

/// Accepted upload formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::from_path(Path::new(filename))
    }

    /// Suffix (with dot) used for scratch files so backends can re-detect the kind.
    pub fn suffix(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => ".pdf",
            DocumentKind::Docx => ".docx",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The extraction backend trait. The orchestration layer only ever sees this.
#[async_trait]
pub trait ResumeExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<ExtractionOutcome, ExtractionError>;

    /// Short label for logs: "heuristic" | "llm".
    fn backend(&self) -> &'static str;
}

/// Builds the extractor selected by configuration.
pub fn build_extractor(config: &Config) -> anyhow::Result<Arc<dyn ResumeExtractor>> {
    match config.extractor {
        ExtractorBackend::Heuristic => Ok(Arc::new(HeuristicExtractor::new())),
        ExtractorBackend::Llm => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("ANTHROPIC_API_KEY is required for EXTRACTOR=llm"))?;
            let mut llm = LlmClient::new(api_key)?;
            if let Some(url) = &config.anthropic_api_url {
                llm = llm.with_api_url(url.as_str());
            }
            Ok(Arc::new(LlmExtractor::new(llm)))
        }
    }
}
