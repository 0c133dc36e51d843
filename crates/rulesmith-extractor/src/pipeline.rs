//! Pipeline driver: normalize, chunk, extract, deduplicate

use crate::chunking::TextChunker;
use crate::config::ExtractorConfig;
use crate::dedup::dedupe;
use crate::document::Document;
use crate::error::ExtractorError;
use crate::extractor::RuleExtractor;
use crate::normalize::normalize;
use crate::types::{ExtractionMetadata, ExtractionReport};
use rulesmith_domain::{LlmProvider, ProgressObserver};
use std::time::Instant;
use tracing::{debug, info};

/// Progress after normalization
pub const PROGRESS_NORMALIZED: u8 = 20;
/// Progress after chunking
pub const PROGRESS_CHUNKED: u8 = 40;
/// Progress once every chunk has been extracted
pub const PROGRESS_EXTRACTED: u8 = 80;
/// Progress after deduplication
pub const PROGRESS_DEDUPLICATED: u8 = 90;
/// Progress when the run is complete
pub const PROGRESS_DONE: u8 = 100;

/// Sequential rule extraction pipeline for one document at a time
pub struct Pipeline<L> {
    extractor: RuleExtractor<L>,
    chunker: TextChunker,
    config: ExtractorConfig,
}

impl<L> Pipeline<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a pipeline, validating the configuration up front
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        let chunker = TextChunker::from_config(&config)?;
        Ok(Self {
            extractor: RuleExtractor::new(llm_provider),
            chunker,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Decode a document and run the pipeline over its text
    pub fn run(
        &self,
        document: &Document,
        observer: &mut impl ProgressObserver,
    ) -> Result<ExtractionReport, ExtractorError> {
        let raw = document.decode()?;
        Ok(self.run_text(document.name(), &raw, observer))
    }

    /// Run the pipeline over already decoded text
    ///
    /// Never fails: a chunk whose extraction call fails, or whose response
    /// carries no rule list, contributes no rules and is counted as failed.
    pub fn run_text(
        &self,
        source: &str,
        raw_text: &str,
        observer: &mut impl ProgressObserver,
    ) -> ExtractionReport {
        let start_time = Instant::now();
        info!("Starting extraction for '{}' ({} chars)", source, raw_text.len());

        let text = normalize(raw_text);
        observer.on_progress(PROGRESS_NORMALIZED, "Cleaning text");

        let chunks = self.chunker.chunk(&text);
        info!(
            "Split text into {} chunks (size {}, overlap {})",
            chunks.len(),
            self.chunker.size(),
            self.chunker.overlap()
        );
        observer.on_progress(PROGRESS_CHUNKED, "Chunking document");

        let mut candidates = Vec::new();
        let mut failed_chunks = 0;

        if chunks.is_empty() {
            observer.on_progress(PROGRESS_EXTRACTED, "Extracting rules");
        }
        for chunk in &chunks {
            debug!("Processing chunk {}/{}", chunk.index + 1, chunks.len());

            match self.extractor.extract_checked(chunk.text, chunk.index) {
                Some(rules) => candidates.extend(rules),
                None => failed_chunks += 1,
            }

            let label = format!("Extracting rules ({}/{})", chunk.index + 1, chunks.len());
            observer.on_progress(extraction_progress(chunk.index, chunks.len()), &label);
        }

        let candidate_count = candidates.len();
        let mut rules = dedupe(candidates);
        if self.config.renumber_ids {
            rules.renumber_ids();
        }
        observer.on_progress(PROGRESS_DEDUPLICATED, "Deduplicating rules");

        let metadata = ExtractionMetadata {
            source: source.to_string(),
            model_name: self.extractor.provider().model_name().to_string(),
            chunk_count: chunks.len(),
            failed_chunks,
            candidate_count,
            rule_count: rules.len(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete: {} unique rules from {} candidates, {} of {} chunks failed",
            rules.len(),
            candidate_count,
            failed_chunks,
            chunks.len()
        );
        observer.on_progress(PROGRESS_DONE, "Done");

        ExtractionReport { rules, metadata }
    }
}

/// Progress after extracting chunk `index` of `total`, spread over 40..=80
fn extraction_progress(index: usize, total: usize) -> u8 {
    let span = (PROGRESS_EXTRACTED - PROGRESS_CHUNKED) as usize;
    PROGRESS_CHUNKED + ((index + 1) * span / total) as u8
}
