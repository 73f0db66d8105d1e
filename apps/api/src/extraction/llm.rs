//! LLM extractor — asks Claude to fill `ExtractedFields` from the document text.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::extraction::document::read_document_text;
use crate::extraction::prompts::{EXTRACTION_PROMPT_TEMPLATE, EXTRACTION_SYSTEM};
use crate::extraction::{ExtractedFields, ExtractionError, ExtractionOutcome, ResumeExtractor};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

pub struct LlmExtractor {
    llm: LlmClient,
}

impl LlmExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeExtractor for LlmExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractionOutcome, ExtractionError> {
        let text = read_document_text(path).await?;
        if text.trim().is_empty() {
            debug!("Document has no text; skipping LLM call");
            return Ok(ExtractionOutcome::Empty);
        }

        let prompt = build_prompt(&text);
        let system = format!("{EXTRACTION_SYSTEM} {JSON_ONLY_SYSTEM}");
        let fields: ExtractedFields = self
            .llm
            .call_json(&prompt, &system)
            .await
            .map_err(|e| {
                warn!("LLM extraction failed: {e}");
                ExtractionError::Backend(e.to_string())
            })?;

        Ok(fields.into_outcome())
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn build_prompt(resume_text: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
