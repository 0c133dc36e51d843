//! Result types for a pipeline run

use crate::error::ExtractorError;
use rulesmith_domain::RuleSet;

/// Default file name for the exported rule set
pub const EXPORT_FILE_NAME: &str = "extracted_rules.json";

/// MIME type of the exported rule set
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// Result of one extraction run
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// Deduplicated rules in first-seen order
    pub rules: RuleSet,

    /// Metadata about the run
    pub metadata: ExtractionMetadata,
}

impl ExtractionReport {
    /// Render the rule set as `{"rules": [...]}` with 2-space indentation
    pub fn to_json_pretty(&self) -> Result<String, ExtractorError> {
        Ok(serde_json::to_string_pretty(&self.rules)?)
    }
}

/// Metadata about an extraction run
#[derive(Debug, Clone, Default)]
pub struct ExtractionMetadata {
    /// Name of the source document
    pub source: String,

    /// Name of the LLM model used
    pub model_name: String,

    /// Number of chunks sent for extraction
    pub chunk_count: usize,

    /// Chunks whose extraction call failed and contributed no rules
    pub failed_chunks: usize,

    /// Candidate rules parsed across all chunks, before deduplication
    pub candidate_count: usize,

    /// Unique rules kept after deduplication
    pub rule_count: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
