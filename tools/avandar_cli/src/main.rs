//! Avandar command-line tools.

use anyhow::{Context, Result};
use avandar::{parser, Config, FeatureFlags};
use clap::Parser;

mod cli;
mod commands;
mod logging;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{run_compile, run_filter, run_scaffold};
use crate::logging::{init_logging, LogConfig, LogFormat};

const FEATURE_FLAGS_ENV: &str = "AVANDAR_FEATURE_FLAGS";

fn main() {
    let cli = Cli::parse();
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
    };
    if let Err(error) = init_logging(&LogConfig::from_verbosity(cli.verbose).with_format(format)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    if let Err(error) = run(&cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    tracing::debug!(flags = ?config.feature_flags, "loaded configuration");

    match &cli.command {
        Command::Compile(args) => println!("{}", run_compile(args)?),
        Command::Filter(args) => println!("{}", run_filter(args)?),
        Command::Scaffold(args) => {
            for path in run_scaffold(args, &config)? {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => parser::parse_config_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    Ok(match std::env::var(FEATURE_FLAGS_ENV) {
        Ok(raw) => config.with_feature_flags(FeatureFlags::parse(&raw)),
        Err(_) => config,
    })
}
