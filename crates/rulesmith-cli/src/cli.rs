//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Rulesmith - Turn prose programming guidelines into structured rules.
#[derive(Debug, Parser)]
#[command(name = "rulesmith")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format for extracted rules
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Hide progress and summary messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (nothing on stdout)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract rules from a text or PDF guideline document
    Extract(ExtractArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Guideline document (.txt, .md or .pdf)
    pub input: PathBuf,

    /// Where to write the exported JSON
    #[arg(short, long, default_value = rulesmith_extractor::EXPORT_FILE_NAME)]
    pub output: PathBuf,

    /// Do not write the export file
    #[arg(long)]
    pub no_export: bool,

    /// API key for the extraction service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Sampling temperature (overrides config)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Request timeout in seconds (overrides config)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Chunk size in characters (overrides config)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Chunk overlap in characters (overrides config)
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Replace service-suggested rule ids with sequential ids
    #[arg(long)]
    pub renumber: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
