//! xmlsynth CLI tool

#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use commands::{GenerateCommand, InspectCommand};
use xmlsynth::observability::{self, ObservabilityConfig};

#[derive(Parser)]
#[command(name = "xmlsynth")]
#[command(version)]
#[command(about = "Generate synthetic XML documents from real samples", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build templates from the sample directory and render a batch
    Generate {
        /// Number of documents to generate
        #[arg(short = 'n', long, value_parser = parse_count)]
        count: Option<usize>,
        /// Directory holding sample documents
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Directory receiving generated documents
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// RNG seed for a reproducible batch
        #[arg(long)]
        seed: Option<u64>,
        /// Output file name prefix
        #[arg(long)]
        prefix: Option<String>,
        /// Configuration file (defaults to ./xmlsynth.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show the inferred mapping and template of one sample
    Inspect {
        /// Sample document
        file: PathBuf,
        /// Print the mapping as JSON
        #[arg(long)]
        json: bool,
        /// Configuration file (defaults to ./xmlsynth.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn parse_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("count must be at least 1".to_string()),
        Ok(count) => Ok(count),
        Err(err) => Err(err.to_string()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = ObservabilityConfig::from_verbosity(cli.verbose);
    if cli.log_json {
        logging = logging.with_json();
    }
    observability::init(&logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Generate {
            count,
            input,
            output,
            seed,
            prefix,
            config,
        } => {
            let cmd = GenerateCommand {
                count,
                input,
                output,
                seed,
                prefix,
                config,
            };
            cmd.execute()?;
        }
        Commands::Inspect { file, json, config } => {
            let cmd = InspectCommand { file, json, config };
            cmd.execute()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults_to_config_values() {
        let cli = Cli::try_parse_from(["xmlsynth", "generate"]).unwrap();
        match cli.command {
            Commands::Generate {
                count, input, seed, ..
            } => {
                assert_eq!(count, None);
                assert_eq!(input, None);
                assert_eq!(seed, None);
            }
            Commands::Inspect { .. } => panic!("expected generate"),
        }
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "xmlsynth", "-vv", "generate", "-n", "25", "--input", "in", "--output", "out",
            "--seed", "7", "--prefix", "nfe",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Generate {
                count,
                input,
                output,
                seed,
                prefix,
                config,
            } => {
                assert_eq!(count, Some(25));
                assert_eq!(input, Some(PathBuf::from("in")));
                assert_eq!(output, Some(PathBuf::from("out")));
                assert_eq!(seed, Some(7));
                assert_eq!(prefix.as_deref(), Some("nfe"));
                assert_eq!(config, None);
            }
            Commands::Inspect { .. } => panic!("expected generate"),
        }
    }

    #[test]
    fn test_count_must_be_positive() {
        assert!(Cli::try_parse_from(["xmlsynth", "generate", "--count", "0"]).is_err());
        assert!(Cli::try_parse_from(["xmlsynth", "generate", "--count", "-3"]).is_err());
        assert!(Cli::try_parse_from(["xmlsynth", "generate", "--count", "ten"]).is_err());
    }

    #[test]
    fn test_inspect_requires_a_file() {
        assert!(Cli::try_parse_from(["xmlsynth", "inspect"]).is_err());
        let cli = Cli::try_parse_from(["xmlsynth", "inspect", "nfe.xml", "--json", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Inspect { file, json, .. } => {
                assert_eq!(file, PathBuf::from("nfe.xml"));
                assert!(json);
            }
            Commands::Generate { .. } => panic!("expected inspect"),
        }
    }
}
