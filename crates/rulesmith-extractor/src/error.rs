//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Only entry-time problems surface as errors from a pipeline run.
/// Per-chunk failures are logged and degrade to zero rules for that chunk.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Invalid pipeline configuration (e.g. chunk overlap not below chunk size)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input the pipeline cannot read (unknown format, invalid UTF-8)
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Input file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF could not be loaded
    #[error("PDF error: {0}")]
    Pdf(String),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// JSON parsing or serialization error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

impl From<lopdf::Error> for ExtractorError {
    fn from(e: lopdf::Error) -> Self {
        ExtractorError::Pdf(e.to_string())
    }
}
