//! mdpolish CLI
//!
//! Formats Markdown documents and checks them against academic-writing rules.

mod cli;
mod commands;
mod files;
mod output;
mod runner;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{format, init, lint, presets, rules};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(has_findings) => {
            if has_findings {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Format {
            patterns,
            write,
            check,
            preset,
            output,
            since,
        } => format::run_format(
            cli,
            patterns,
            *write,
            *check,
            preset.as_deref(),
            *output,
            since.as_deref(),
        ),
        Commands::Lint {
            patterns,
            preset,
            output,
            since,
        } => lint::run_lint(cli, patterns, preset.as_deref(), *output, since.as_deref()),
        Commands::Rules => {
            rules::run_rules();
            Ok(false)
        }
        Commands::Presets => {
            presets::run_presets();
            Ok(false)
        }
        Commands::Init { force } => init::run_init(*force).map(|_| false),
    }
}
