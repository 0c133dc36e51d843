//! Per-chunk rule extraction through the LLM provider

use crate::error::ExtractorError;
use crate::parser::try_parse_llm_response;
use crate::prompt::PromptBuilder;
use rulesmith_domain::{LlmProvider, Rule};
use tracing::{debug, warn};

/// Extracts candidate rules from single chunks of text
pub struct RuleExtractor<L> {
    llm_provider: L,
}

impl<L> RuleExtractor<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a new extractor over an LLM provider
    pub fn new(llm_provider: L) -> Self {
        Self { llm_provider }
    }

    /// The underlying provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// Extract rules from a chunk, degrading any failure to zero rules
    pub fn extract(&self, chunk: &str, chunk_index: usize) -> Vec<Rule> {
        self.extract_checked(chunk, chunk_index).unwrap_or_default()
    }

    /// Extract rules from a chunk, returning `None` if the chunk failed
    ///
    /// Failures are logged here so callers only need to count them.
    pub fn extract_checked(&self, chunk: &str, chunk_index: usize) -> Option<Vec<Rule>> {
        match self.try_extract(chunk, chunk_index) {
            Ok(rules) => Some(rules),
            Err(e) => {
                warn!("Chunk {} contributed no rules: {}", chunk_index, e);
                None
            }
        }
    }

    /// Extract rules from a chunk, reporting a failed service call or a
    /// response that carries no rule list
    pub fn try_extract(&self, chunk: &str, chunk_index: usize) -> Result<Vec<Rule>, ExtractorError> {
        let prompt = PromptBuilder::new(chunk, chunk_index).build();
        debug!("Chunk {}: prompt length {} chars", chunk_index, prompt.len());

        let response = self
            .llm_provider
            .generate(&prompt)
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;
        debug!("Chunk {}: response length {} chars", chunk_index, response.len());

        try_parse_llm_response(&response)
    }
}
