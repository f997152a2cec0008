//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// mdpolish - Markdown formatter and academic-writing linter
#[derive(Parser)]
#[command(name = "mdpolish")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
    Sarif,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format files and report remaining issues
    Format {
        /// Files, directories or glob patterns
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Write formatted content back to the files
        #[arg(long, conflicts_with = "check")]
        write: bool,

        /// Exit with status 1 if any file would change
        #[arg(long)]
        check: bool,

        /// Preset to use instead of the configured rules
        #[arg(short, long)]
        preset: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,

        /// Previous version of the file; only changed lines are reported
        #[arg(long, value_name = "FILE")]
        since: Option<PathBuf>,
    },

    /// Lint files without modifying them
    Lint {
        /// Files, directories or glob patterns
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Preset to use instead of the configured rules
        #[arg(short, long)]
        preset: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,

        /// Previous version of the file; only changed lines are reported
        #[arg(long, value_name = "FILE")]
        since: Option<PathBuf>,
    },

    /// List registered rules
    Rules,

    /// List built-in presets
    Presets,

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}
