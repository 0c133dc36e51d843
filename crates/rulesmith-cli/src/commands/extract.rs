//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::{Config, ProviderSettings};
use crate::error::Result;
use crate::output::{Formatter, ProgressReporter};
use rulesmith_domain::{LlmProvider, ProgressObserver};
use rulesmith_extractor::{Document, ExtractionReport, ExtractorConfig, Pipeline};
use rulesmith_llm::OpenAiProvider;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Execute the extract command.
pub fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    formatter: &Formatter,
    color_enabled: bool,
    quiet: bool,
) -> Result<()> {
    let provider_settings = provider_settings(&args, &config.provider);
    let extractor_config = extractor_config(&args, &config.extractor);

    // Credentials are checked before any input is read.
    let llm = build_provider(args.api_key.as_deref(), &provider_settings)?;
    let mut progress = ProgressReporter::stderr(color_enabled, !quiet);

    let report = run_extraction(llm, extractor_config, &args.input, &mut progress)?;

    if !args.no_export {
        write_export(&args.output, &report)?;
        info!("Wrote {} rules to {}", report.rules.len(), args.output.display());
    }

    let rendered = formatter.format_rules(&report.rules)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    if !quiet {
        if report.metadata.failed_chunks > 0 {
            eprintln!(
                "{}",
                formatter.warning(&format!(
                    "{} of {} chunk(s) failed and contributed no rules",
                    report.metadata.failed_chunks, report.metadata.chunk_count
                ))
            );
        }
        eprintln!("{}", formatter.run_summary(&report.metadata));
        if !args.no_export {
            eprintln!(
                "{}",
                formatter.info(&format!("Saved to {}", args.output.display()))
            );
        }
    }

    Ok(())
}

/// Load a document and run the pipeline over it.
pub fn run_extraction<L>(
    llm: L,
    extractor_config: ExtractorConfig,
    input: &Path,
    observer: &mut impl ProgressObserver,
) -> Result<ExtractionReport>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    let pipeline = Pipeline::new(llm, extractor_config)?;
    let document = Document::from_path(input)?;
    Ok(pipeline.run(&document, observer)?)
}

/// Write the exported rule set as pretty JSON.
pub fn write_export(path: &Path, report: &ExtractionReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = report.to_json_pretty()?;
    fs::write(path, json)?;
    Ok(())
}

/// Provider settings with command-line overrides applied.
pub fn provider_settings(args: &ExtractArgs, base: &ProviderSettings) -> ProviderSettings {
    ProviderSettings {
        model: args.model.clone().unwrap_or_else(|| base.model.clone()),
        base_url: args.base_url.clone().unwrap_or_else(|| base.base_url.clone()),
        timeout_secs: args.timeout.unwrap_or(base.timeout_secs),
        temperature: args.temperature.unwrap_or(base.temperature),
    }
}

/// Extractor configuration with command-line overrides applied.
pub fn extractor_config(args: &ExtractArgs, base: &ExtractorConfig) -> ExtractorConfig {
    ExtractorConfig {
        chunk_size: args.chunk_size.unwrap_or(base.chunk_size),
        chunk_overlap: args.overlap.unwrap_or(base.chunk_overlap),
        renumber_ids: args.renumber || base.renumber_ids,
    }
}

fn build_provider(api_key: Option<&str>, settings: &ProviderSettings) -> Result<OpenAiProvider> {
    let api_key = api_key.unwrap_or_default();
    let provider = OpenAiProvider::new(api_key, settings.model.clone())?
        .with_base_url(settings.base_url.clone())
        .with_temperature(settings.temperature)
        .with_timeout(Duration::from_secs(settings.timeout_secs));

    info!("Using model '{}' at {}", settings.model, settings.base_url);
    Ok(provider)
}
