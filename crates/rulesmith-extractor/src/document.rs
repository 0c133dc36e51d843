//! Input documents and their decoding to plain text

use crate::error::ExtractorError;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Declared format of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// UTF-8 plain text (including Markdown)
    Text,
    /// Portable Document Format
    Pdf,
}

impl DocumentFormat {
    /// Format for a file extension, case-insensitive
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "text" | "md" | "markdown" => Some(DocumentFormat::Text),
            "pdf" => Some(DocumentFormat::Pdf),
            _ => None,
        }
    }

    /// Determine the format from a path's extension, falling back to content
    ///
    /// Files without an extension are PDF if they start with `%PDF-` and
    /// text if they are valid UTF-8. Unknown extensions are rejected.
    pub fn detect(path: &Path, bytes: &[u8]) -> Result<Self, ExtractorError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => Self::from_extension(ext).ok_or_else(|| {
                ExtractorError::UnsupportedInput(format!(
                    "'{}' has unsupported extension '.{}' (expected .txt, .md or .pdf)",
                    path.display(),
                    ext
                ))
            }),
            None if bytes.starts_with(PDF_MAGIC) => Ok(DocumentFormat::Pdf),
            None if std::str::from_utf8(bytes).is_ok() => Ok(DocumentFormat::Text),
            None => Err(ExtractorError::UnsupportedInput(format!(
                "cannot determine the format of '{}'",
                path.display()
            ))),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Text => write!(f, "text"),
            DocumentFormat::Pdf => write!(f, "pdf"),
        }
    }
}

/// Raw input bytes plus their declared format
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    format: DocumentFormat,
    bytes: Vec<u8>,
}

impl Document {
    /// Create a document from bytes with a known format
    pub fn from_bytes(name: impl Into<String>, format: DocumentFormat, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            format,
            bytes,
        }
    }

    /// Create a plain-text document from a string
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::from_bytes(name, DocumentFormat::Text, text.into().into_bytes())
    }

    /// Read a document from disk, detecting its format
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExtractorError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let format = DocumentFormat::detect(path, &bytes)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!("Loaded '{}' ({} bytes, {})", name, bytes.len(), format);
        Ok(Self::from_bytes(name, format, bytes))
    }

    /// Name used in logs and run metadata
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared format
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Raw bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the document into raw (not yet normalized) text
    ///
    /// PDF pages are extracted one at a time and joined with a single space;
    /// pages without extractable text are skipped.
    pub fn decode(&self) -> Result<String, ExtractorError> {
        match self.format {
            DocumentFormat::Text => std::str::from_utf8(&self.bytes)
                .map(str::to_string)
                .map_err(|e| {
                    ExtractorError::UnsupportedInput(format!(
                        "'{}' is not valid UTF-8: {}",
                        self.name, e
                    ))
                }),
            DocumentFormat::Pdf => pdf_text(&self.name, &self.bytes),
        }
    }
}

fn pdf_text(name: &str, bytes: &[u8]) -> Result<String, ExtractorError> {
    let mut pdf = lopdf::Document::load_mem(bytes)?;
    // Many encrypted PDFs only restrict editing and open with an empty user password.
    if pdf.is_encrypted() {
        pdf.decrypt("").map_err(|e| {
            ExtractorError::Pdf(format!("'{}' is encrypted and needs a password: {}", name, e))
        })?;
        debug!("Opened encrypted '{}' with an empty user password", name);
    }

    let page_numbers: Vec<u32> = pdf.get_pages().keys().copied().collect();
    let mut pages = Vec::with_capacity(page_numbers.len());

    for page_number in &page_numbers {
        match pdf.extract_text(&[*page_number]) {
            Ok(text) if !text.trim().is_empty() => pages.push(text),
            Ok(_) => debug!("Page {} of '{}' has no text", page_number, name),
            Err(e) => warn!("Skipping page {} of '{}': {}", page_number, name, e),
        }
    }

    debug!(
        "Extracted text from {}/{} pages of '{}'",
        pages.len(),
        page_numbers.len(),
        name
    );
    Ok(pages.join(" "))
}
