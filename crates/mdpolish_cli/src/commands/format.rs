//! Format command implementation

use std::path::Path;

use miette::Result;
use tracing::info;

use super::{Inputs, report_failures};
use crate::cli::{Cli, OutputFormat};
use crate::output::output_documents;
use crate::runner::{Mode, process_files, write_changes};

/// Returns true when the run should exit with status 1.
pub fn run_format(
    cli: &Cli,
    patterns: &[String],
    write: bool,
    check: bool,
    preset: Option<&str>,
    output: OutputFormat,
    since: Option<&Path>,
) -> Result<bool> {
    let inputs = Inputs::resolve(cli, patterns, preset, since)?;
    let (documents, failures) =
        process_files(&inputs.paths, &inputs.base_dir, &inputs.options, Mode::Format);
    report_failures(&failures);

    if write {
        let written = write_changes(&documents)?;
        info!("Wrote {} file(s)", written);
    }

    output_documents(&documents, output, Mode::Format, write)?;

    let changed = documents.iter().any(|d| d.changed());
    Ok((check && changed) || !failures.is_empty())
}
