//! Rule module - the unit of output produced by an extraction run

use serde::{Deserialize, Serialize};

/// A single programming rule extracted from a guideline document
///
/// Every field defaults to an empty string when absent so that partially
/// formed entries from the extraction service still deserialize. Entries
/// with empty `rule` text are dropped during deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    /// Identifier suggested by the extraction service (not globally unique)
    #[serde(default)]
    pub rule_id: String,

    /// Statement of the rule; the deduplication key
    #[serde(default)]
    pub rule: String,

    /// Suggested remediation for code violating the rule
    #[serde(default)]
    pub suggested_fix: String,
}

impl Rule {
    /// Create a new rule
    pub fn new(
        rule_id: impl Into<String>,
        rule: impl Into<String>,
        suggested_fix: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule: rule.into(),
            suggested_fix: suggested_fix.into(),
        }
    }

    /// Case-folded rule text used to detect duplicates
    ///
    /// # Examples
    ///
    /// ```
    /// use rulesmith_domain::Rule;
    ///
    /// let rule = Rule::new("R001", "Use Snake_Case", "");
    /// assert_eq!(rule.dedup_key(), "use snake_case");
    /// ```
    pub fn dedup_key(&self) -> String {
        self.rule.to_lowercase()
    }

    /// Whether the rule carries any statement text
    pub fn has_text(&self) -> bool {
        !self.rule.is_empty()
    }

    /// Identifier suggested to the extraction service for the `sequence`-th
    /// rule of chunk `chunk_index` (`R<chunk><sequence>`)
    ///
    /// # Examples
    ///
    /// ```
    /// use rulesmith_domain::Rule;
    ///
    /// assert_eq!(Rule::suggested_id(0, 1), "R001");
    /// assert_eq!(Rule::suggested_id(12, 1), "R1201");
    /// ```
    pub fn suggested_id(chunk_index: usize, sequence: usize) -> String {
        format!("R{}{:02}", chunk_index, sequence)
    }
}
