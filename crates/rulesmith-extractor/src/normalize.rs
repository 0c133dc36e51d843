//! Whitespace normalization of decoded document text

/// Collapse every run of whitespace into a single space and trim the ends
///
/// Any Unicode whitespace counts, so tabs, newlines, carriage returns and
/// non-breaking spaces all fold into one ASCII space.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
