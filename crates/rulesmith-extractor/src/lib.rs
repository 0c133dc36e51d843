//! Rulesmith Extractor
//!
//! Converts prose programming guidelines into a deduplicated list of rules.
//!
//! # Overview
//!
//! The pipeline normalizes a document's text, cuts it into overlapping
//! fixed-size windows, asks an LLM for the rules in each window, recovers JSON
//! from whatever the model answers, and merges the results.
//!
//! # Architecture
//!
//! ```text
//! Document → normalize → chunk → (per chunk: prompt → LLM → parse) → dedupe → RuleSet
//! ```
//!
//! Chunks are processed strictly one after another. A chunk whose LLM call
//! fails, or whose response cannot be parsed, contributes zero rules; only
//! configuration and input errors abort a run.
//!
//! # Example Usage
//!
//! ```
//! use rulesmith_extractor::{Document, ExtractorConfig, Pipeline};
//! use rulesmith_domain::NoopObserver;
//! use rulesmith_llm::MockProvider;
//!
//! # fn example() -> Result<(), rulesmith_extractor::ExtractorError> {
//! let llm = MockProvider::new(
//!     r#"{"rules": [{"rule_id": "R001", "rule": "Use snake_case", "suggested_fix": "Rename it"}]}"#,
//! );
//! let pipeline = Pipeline::new(llm, ExtractorConfig::default())?;
//!
//! let document = Document::from_text("guide.txt", "Functions use snake_case.");
//! let report = pipeline.run(&document, &mut NoopObserver)?;
//!
//! assert_eq!(report.rules.len(), 1);
//! println!("{}", report.to_json_pretty()?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod dedup;
mod document;
mod error;
mod extractor;
mod normalize;
mod parser;
mod pipeline;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use chunking::{chunk, Chunk, TextChunker};
pub use config::{ExtractorConfig, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use dedup::dedupe;
pub use document::{Document, DocumentFormat};
pub use error::ExtractorError;
pub use extractor::RuleExtractor;
pub use normalize::normalize;
pub use parser::{parse_llm_response, try_parse_llm_response};
pub use pipeline::{
    Pipeline, PROGRESS_CHUNKED, PROGRESS_DEDUPLICATED, PROGRESS_DONE, PROGRESS_EXTRACTED,
    PROGRESS_NORMALIZED,
};
pub use prompt::PromptBuilder;
pub use types::{ExtractionMetadata, ExtractionReport, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
