//! Rulesmith CLI - Extract structured programming rules from guideline documents.

use clap::Parser;
use rulesmith_cli::commands;
use rulesmith_cli::config::OutputFormat;
use rulesmith_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG wins over -v flags.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> rulesmith_cli::Result<()> {
    match cli.command {
        Command::Extract(args) => {
            let config = Config::load(cli.config.as_deref())?;

            let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
            let color_enabled = !cli.no_color && config.settings.color;
            if !color_enabled {
                colored::control::set_override(false);
            }
            let formatter = Formatter::new(format, color_enabled);

            commands::execute_extract(args, &config, &formatter, color_enabled, cli.quiet)?;
        }
        Command::Config(args) => {
            // A broken config file must not block `config init --force`.
            let formatter = Formatter::new(OutputFormat::Table, !cli.no_color);
            commands::execute_config(args, cli.config.as_deref(), &formatter)?;
        }
    }

    Ok(())
}
