//! LLM prompt engineering for rule extraction

use rulesmith_domain::Rule;

/// Builds the extraction prompt for one chunk
pub struct PromptBuilder<'a> {
    text: &'a str,
    chunk_index: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for the chunk at `chunk_index`
    pub fn new(text: &'a str, chunk_index: usize) -> Self {
        Self { text, chunk_index }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Instructions
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Output schema, seeded with this chunk's id prefix
        prompt.push_str("Format:\n");
        prompt.push_str(&self.output_format());
        prompt.push_str("\n\n");

        // 3. The text to analyze
        prompt.push_str("TEXT:\n");
        prompt.push_str(self.text);
        prompt.push('\n');

        prompt
    }

    fn output_format(&self) -> String {
        format!(
            r#"{{
  "rules": [
    {{
      "rule_id": "{}",
      "rule": "Rule text",
      "suggested_fix": "Suggested fix"
    }}
  ]
}}"#,
            Rule::suggested_id(self.chunk_index, 1)
        )
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract ALL programming rules from the text.
Each rule must be a single, self-contained guideline a reviewer could check code against.
Number rule ids sequentially after the example id.
Return ONLY JSON: no markdown code blocks, no explanations."#;
