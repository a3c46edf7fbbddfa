//! Soform CLI - edit and list records through soform forms and grids

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use soform_core::EnvironmentConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod demo;

#[derive(Parser)]
#[command(name = "soform")]
#[command(version = soform_core::VERSION)]
#[command(about = "Bean-bound forms and grids", long_about = None)]
struct Cli {
    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Environment configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit a contact record through a form and print the result
    Form {
        /// JSON file holding the record
        record: Option<PathBuf>,

        /// Field edit, e.g. `--set Age=37` (repeatable)
        #[arg(long, value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Fields that must not be empty (comma-separated)
        #[arg(long, value_delimiter = ',')]
        required: Vec<String>,
    },

    /// List contact records in a grid
    Grid {
        /// JSON file holding an array of records
        records: PathBuf,

        /// Columns to show (comma-separated)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<EnvironmentConfig> {
    match path {
        Some(path) => EnvironmentConfig::load(path)
            .with_context(|| format!("Failed to load configuration `{}`", path.display())),
        None => Ok(EnvironmentConfig::default()),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_ref())?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Form {
            record,
            set,
            required,
        } => {
            let options = commands::FormOptions {
                record,
                set,
                required,
            };
            if !commands::run_form(config, &options, &mut stdout)? {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Grid { records, columns } => {
            let options = commands::GridOptions { records, columns };
            commands::run_grid(config, &options, &mut stdout)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write as _;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_form_edits() {
        let cli = Cli::parse_from([
            "soform", "-v", "form", "--set", "Age=3", "--set", "Name=Ada", "--required", "Name,Email",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Form { record, set, required } => {
                assert!(record.is_none());
                assert_eq!(set, vec!["Age=3", "Name=Ada"]);
                assert_eq!(required, vec!["Name", "Email"]);
            }
            Commands::Grid { .. } => panic!("expected form"),
        }
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "true_text = \"on\"").unwrap();
        let config = load_config(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.true_text, "on");
        assert_eq!(config.form_columns, 2);
    }

    #[test]
    fn test_load_config_rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "colour = \"red\"").unwrap();
        assert!(load_config(Some(&file.path().to_path_buf())).is_err());
    }
}
