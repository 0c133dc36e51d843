//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};

/// Default chunk window size (characters)
pub const DEFAULT_CHUNK_SIZE: usize = 800;

/// Default overlap between neighbouring chunks (characters)
pub const DEFAULT_CHUNK_OVERLAP: usize = 150;

/// Configuration for the extraction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Chunk window size (characters)
    pub chunk_size: usize,

    /// Characters shared by neighbouring chunks; must be below `chunk_size`
    pub chunk_overlap: usize,

    /// Replace service-suggested ids with sequential ids after deduplication
    pub renumber_ids: bool,
}

impl ExtractorConfig {
    /// Characters the window advances between chunks
    pub fn stride(&self) -> usize {
        self.chunk_size.saturating_sub(self.chunk_overlap)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.chunk_size == 0 {
            return Err(ExtractorError::Config(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ExtractorError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            renumber_ids: false,
        }
    }
}

impl ExtractorConfig {
    /// Fine-grained preset: small windows, more calls, fewer rules lost per chunk
    pub fn fine_grained() -> Self {
        Self {
            chunk_size: 400,
            chunk_overlap: 80,
            renumber_ids: false,
        }
    }

    /// Coarse preset: large windows for long, loosely structured documents
    pub fn coarse() -> Self {
        Self {
            chunk_size: 2_000,
            chunk_overlap: 300,
            renumber_ids: false,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
