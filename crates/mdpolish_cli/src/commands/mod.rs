//! Subcommand implementations

pub mod format;
pub mod init;
pub mod lint;
pub mod presets;
pub mod rules;

use std::path::{Path, PathBuf};

use mdpolish_core::FormatEngineOptions;
use miette::{IntoDiagnostic, Result};

use crate::cli::Cli;
use crate::files::discover_files;
use crate::runner::{engine_options, load_config, since_context};

/// Files and engine options shared by `format` and `lint`.
pub struct Inputs {
    pub base_dir: PathBuf,
    pub paths: Vec<PathBuf>,
    pub options: FormatEngineOptions,
}

impl Inputs {
    pub fn resolve(
        cli: &Cli,
        patterns: &[String],
        preset: Option<&str>,
        since: Option<&Path>,
    ) -> Result<Self> {
        let base_dir = std::env::current_dir().into_diagnostic()?;
        let config = load_config(cli.config.as_deref(), &base_dir)?;
        let mut options = engine_options(&config, preset)?;
        let paths = discover_files(patterns, &base_dir)?;

        if let Some(previous) = since {
            let [path] = paths.as_slice() else {
                return Err(miette::miette!(
                    "--since requires exactly one input file, got {}",
                    paths.len()
                ));
            };
            let current = std::fs::read_to_string(path).into_diagnostic()?;
            options = options.with_context(since_context(previous, &current)?);
        }

        Ok(Self {
            base_dir,
            paths,
            options,
        })
    }
}

/// Prints files that could not be processed.
pub fn report_failures(failures: &[(PathBuf, String)]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("\n{} file(s) could not be processed:", failures.len());
    for (path, error) in failures {
        eprintln!("  {}: {}", path.display(), error);
    }
}
