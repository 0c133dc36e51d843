//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config_path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = Config::load(config_path)?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", Config::resolve_path(config_path)?.display());
        }
        ConfigAction::Init { force } => {
            let path = init_config(config_path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
    }

    Ok(())
}

/// Write a default configuration file, refusing to overwrite unless forced.
pub fn init_config(config_path: Option<&Path>, force: bool) -> Result<std::path::PathBuf> {
    let path = Config::resolve_path(config_path)?;
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let written = init_config(Some(&path), false).unwrap();
        assert_eq!(written, path);

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.extractor.chunk_size, 800);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\ncolor = false\n").unwrap();

        assert!(matches!(init_config(Some(&path), false), Err(CliError::Config(_))));
        assert!(init_config(Some(&path), true).is_ok());
        assert!(Config::load(Some(&path)).unwrap().settings.color);
    }
}
