//! Sliding-window chunking of normalized text

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;

/// One window of the normalized document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Position in the chunk sequence
    pub index: usize,

    /// Offset of the first character, in characters from the start of the text
    pub start: usize,

    /// The window's text
    pub text: &'a str,
}

impl Chunk<'_> {
    /// Length of the window in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Splits text into fixed-size windows that overlap their neighbour
///
/// Sizes are counted in characters, so a window never splits a code point.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a chunker, rejecting settings that would never advance
    pub fn new(size: usize, overlap: usize) -> Result<Self, ExtractorError> {
        ExtractorConfig {
            chunk_size: size,
            chunk_overlap: overlap,
            ..ExtractorConfig::default()
        }
        .validate()?;

        Ok(Self { size, overlap })
    }

    /// Create a chunker from pipeline configuration
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Window size in characters
    pub fn size(&self) -> usize {
        self.size
    }

    /// Overlap in characters
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Characters between the starts of consecutive windows
    pub fn stride(&self) -> usize {
        self.size - self.overlap
    }

    /// Chunk the given text
    ///
    /// Windows start at 0, `stride`, `2 * stride`, ... while the start is
    /// inside the text. The last window may be shorter than `size`. Empty
    /// text yields no chunks.
    pub fn chunk<'a>(&self, text: &'a str) -> Vec<Chunk<'a>> {
        // Byte offset of every character boundary, including the end
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        (0..char_count)
            .step_by(self.stride())
            .enumerate()
            .map(|(index, start)| {
                let end = (start + self.size).min(char_count);
                Chunk {
                    index,
                    start,
                    text: &text[boundaries[start]..boundaries[end]],
                }
            })
            .collect()
    }
}

/// Chunk `text` into windows of `size` characters overlapping by `overlap`
///
/// # Errors
///
/// Returns `ExtractorError::Config` if `overlap >= size` or `size == 0`.
pub fn chunk(text: &str, size: usize, overlap: usize) -> Result<Vec<Chunk<'_>>, ExtractorError> {
    Ok(TextChunker::new(size, overlap)?.chunk(text))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::normalize::normalize;
    use proptest::prelude::*;

    proptest! {
        /// Property: taking each chunk's first `stride` characters (the last
        /// chunk whole) rebuilds the normalized text
        #[test]
        fn test_chunks_reassemble_normalized_text(
            raw in "[a-zé \\t\\n]{0,300}",
            size in 1usize..60,
            overlap_seed in 0usize..60,
        ) {
            let overlap = overlap_seed % size;
            let text = normalize(&raw);
            let chunker = TextChunker::new(size, overlap).unwrap();
            let chunks = chunker.chunk(&text);

            let mut rebuilt = String::new();
            for (i, chunk) in chunks.iter().enumerate() {
                if i + 1 == chunks.len() {
                    rebuilt.push_str(chunk.text);
                } else {
                    rebuilt.extend(chunk.text.chars().take(chunker.stride()));
                }
            }
            prop_assert_eq!(rebuilt, text);
        }

        /// Property: every window is at most `size` characters and starts on a stride
        #[test]
        fn test_chunk_bounds(
            text in "[a-z]{0,200}",
            size in 1usize..40,
            overlap_seed in 0usize..40,
        ) {
            let overlap = overlap_seed % size;
            let chunker = TextChunker::new(size, overlap).unwrap();
            for chunk in chunker.chunk(&text) {
                prop_assert!(chunk.char_len() <= size);
                prop_assert!(chunk.char_len() > 0);
                prop_assert_eq!(chunk.start, chunk.index * chunker.stride());
            }
        }
    }
}
