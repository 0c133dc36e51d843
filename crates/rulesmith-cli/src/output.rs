//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use rulesmith_domain::{ProgressObserver, RuleSet};
use rulesmith_extractor::ExtractionMetadata;
use std::io::{self, Write};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const MAX_CELL_CHARS: usize = 72;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a rule set for stdout.
    pub fn format_rules(&self, rules: &RuleSet) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rules)?),
            OutputFormat::Table => Ok(self.format_rules_table(rules)),
            OutputFormat::Quiet => Ok(String::new()),
        }
    }

    fn format_rules_table(&self, rules: &RuleSet) -> String {
        if rules.is_empty() {
            return self.colorize("No rules found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Rule", "Suggested Fix"]);

        for rule in rules {
            builder.push_record([
                rule.rule_id.clone(),
                truncate(&rule.rule, MAX_CELL_CHARS),
                truncate(&rule.suggested_fix, MAX_CELL_CHARS),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Summary line for a finished run.
    pub fn run_summary(&self, metadata: &ExtractionMetadata) -> String {
        let msg = format!(
            "Extracted {} rule(s) from {} ({} chunk(s), {} candidate(s), {} ms)",
            metadata.rule_count,
            metadata.source,
            metadata.chunk_count,
            metadata.candidate_count,
            metadata.processing_time_ms
        );
        self.success(&msg)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Shorten text to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Renders pipeline progress as a single rewritten status line.
pub struct ProgressReporter<W: Write> {
    out: W,
    color_enabled: bool,
    enabled: bool,
}

impl ProgressReporter<io::Stderr> {
    /// Report to stderr.
    pub fn stderr(color_enabled: bool, enabled: bool) -> Self {
        Self::new(io::stderr(), color_enabled, enabled)
    }
}

impl<W: Write> ProgressReporter<W> {
    /// Report to any writer.
    pub fn new(out: W, color_enabled: bool, enabled: bool) -> Self {
        Self {
            out,
            color_enabled,
            enabled,
        }
    }

    /// Consume the reporter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self, percent: u8, label: &str) -> String {
        let bar = progress_bar(percent, 20);
        if self.color_enabled {
            format!("\r{} {:>3}% {}\x1b[K", bar.cyan(), percent, label)
        } else {
            format!("\r{} {:>3}% {}", bar, percent, label)
        }
    }
}

impl<W: Write> ProgressObserver for ProgressReporter<W> {
    fn on_progress(&mut self, percent: u8, label: &str) {
        if !self.enabled {
            return;
        }
        let line = self.render(percent, label);
        // Progress output is best effort.
        let _ = self.out.write_all(line.as_bytes());
        if percent >= 100 {
            let _ = self.out.write_all(b"\n");
        }
        let _ = self.out.flush();
    }
}

/// `[#####.....]` style bar of `width` cells.
fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulesmith_domain::Rule;

    fn sample_rules() -> RuleSet {
        vec![
            Rule::new("R001", "Use snake_case for functions", "Rename the function"),
            Rule::new("R002", "Keep functions short", "Split long functions"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_rules(&sample_rules()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["rules"][1]["rule_id"], "R002");
        assert!(output.starts_with("{\n  \"rules\""));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert!(formatter.format_rules(&sample_rules()).unwrap().is_empty());
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_rules(&sample_rules()).unwrap();
        assert!(output.contains("Suggested Fix"));
        assert!(output.contains("Keep functions short"));
        assert!(output.contains("R001"));
    }

    #[test]
    fn test_empty_rules() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_rules(&RuleSet::new()).unwrap();
        assert!(output.contains("No rules found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }

    #[test]
    fn test_run_summary() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let metadata = ExtractionMetadata {
            source: "guide.pdf".to_string(),
            model_name: "mock".to_string(),
            chunk_count: 3,
            failed_chunks: 0,
            candidate_count: 7,
            rule_count: 5,
            processing_time_ms: 42,
        };
        assert_eq!(
            formatter.run_summary(&metadata),
            "✓ Extracted 5 rule(s) from guide.pdf (3 chunk(s), 7 candidate(s), 42 ms)"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("ééééé", 5), "ééééé");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[..........]");
        assert_eq!(progress_bar(40, 10), "[####......]");
        assert_eq!(progress_bar(100, 10), "[##########]");
    }

    #[test]
    fn test_progress_reporter_output() {
        let mut reporter = ProgressReporter::new(Vec::new(), false, true);
        reporter.on_progress(20, "Cleaning text");
        reporter.on_progress(100, "Done");

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains(" 20% Cleaning text"));
        assert!(out.ends_with("100% Done\n"));
    }

    #[test]
    fn test_disabled_progress_reporter_is_silent() {
        let mut reporter = ProgressReporter::new(Vec::new(), false, false);
        reporter.on_progress(50, "Extracting rules (1/2)");
        assert!(reporter.into_inner().is_empty());
    }
}
