//! Lint command implementation

use std::path::Path;

use miette::Result;

use super::{Inputs, report_failures};
use crate::cli::{Cli, OutputFormat};
use crate::output::output_documents;
use crate::runner::{Mode, process_files};

/// Returns true when any issue was found.
pub fn run_lint(
    cli: &Cli,
    patterns: &[String],
    preset: Option<&str>,
    output: OutputFormat,
    since: Option<&Path>,
) -> Result<bool> {
    let inputs = Inputs::resolve(cli, patterns, preset, since)?;
    let (documents, failures) =
        process_files(&inputs.paths, &inputs.base_dir, &inputs.options, Mode::Lint);
    report_failures(&failures);

    output_documents(&documents, output, Mode::Lint, false)?;

    let has_issues = documents.iter().any(|d| d.result.has_issues());
    Ok(has_issues || !failures.is_empty())
}
