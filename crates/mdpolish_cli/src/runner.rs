//! Config loading and parallel document processing.

use std::fs;
use std::path::{Path, PathBuf};

use mdpolish_core::{
    FormatEngine, FormatEngineOptions, FormatResult, FormatterConfig, LintContext,
    initialize_rules,
};
use miette::{IntoDiagnostic, Result, WrapErr};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// What to do with each document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Run fix rules, then lint the result.
    Format,
    /// Lint the content as it is.
    Lint,
}

/// One processed input file.
#[derive(Debug)]
pub struct Document {
    pub path: PathBuf,
    pub display: String,
    pub result: FormatResult,
}

impl Document {
    /// Returns true if formatting changed the content.
    pub fn changed(&self) -> bool {
        self.result.has_changes
    }
}

/// Loads the configuration given on the command line or discovered in `base_dir`.
pub fn load_config(path: Option<&Path>, base_dir: &Path) -> Result<FormatterConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match discover_config(base_dir) {
            Some(path) => path,
            None => {
                info!("No config file found, using defaults");
                return Ok(FormatterConfig::new());
            }
        },
    };

    info!("Using config: {}", path.display());
    let text = fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    FormatterConfig::from_jsonc(&text).into_diagnostic()
}

fn discover_config(base_dir: &Path) -> Option<PathBuf> {
    FormatterConfig::CONFIG_FILES
        .iter()
        .map(|name| base_dir.join(name))
        .find(|path| path.is_file())
}

/// Builds engine options from the configuration and an optional preset override.
pub fn engine_options(config: &FormatterConfig, preset: Option<&str>) -> Result<FormatEngineOptions> {
    let options = config.resolve(initialize_rules()).into_diagnostic()?;
    Ok(match preset {
        Some(name) => options.with_preset(name),
        None => options,
    })
}

/// Reads the previous version of a file and diffs it against `current`.
pub fn since_context(previous: &Path, current: &str) -> Result<LintContext> {
    let previous = fs::read_to_string(previous)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", previous.display()))?;
    let context = LintContext::between(&previous, current);
    debug!(
        "Restricting lint output to {} changed lines",
        context.changed_lines().map_or(0, |lines| lines.len())
    );
    Ok(context)
}

type Processed = std::result::Result<Document, (PathBuf, String)>;

/// Reads and processes every file in parallel.
///
/// Files that cannot be read are reported and skipped; the second element
/// lists them.
pub fn process_files(
    paths: &[PathBuf],
    base_dir: &Path,
    options: &FormatEngineOptions,
    mode: Mode,
) -> (Vec<Document>, Vec<(PathBuf, String)>) {
    let engine = FormatEngine::new(initialize_rules());

    let results: Vec<Processed> = paths
        .par_iter()
        .map(|path| -> Processed {
            let input = fs::read_to_string(path).map_err(|e| (path.clone(), e.to_string()))?;
            let result = match mode {
                Mode::Format => engine.format(&input, options),
                Mode::Lint => FormatResult {
                    formatted: input.clone(),
                    has_changes: false,
                    applied_rules: Vec::new(),
                    lint_results: engine.lint(
                        &input,
                        &options.resolve_rules(),
                        options.context.as_ref(),
                    ),
                },
            };
            Ok(Document {
                path: path.clone(),
                display: crate::files::display_path(path, base_dir),
                result,
            })
        })
        .collect();

    let mut documents = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(document) => documents.push(document),
            Err((path, error)) => {
                warn!("Failed to read {}: {}", path.display(), error);
                failures.push((path, error));
            }
        }
    }

    (documents, failures)
}

/// Writes changed documents back to disk. Returns the number written.
pub fn write_changes(documents: &[Document]) -> Result<usize> {
    let mut written = 0;
    for document in documents.iter().filter(|d| d.changed()) {
        fs::write(&document.path, &document.result.formatted)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write {}", document.path.display()))?;
        info!("Formatted {}", document.display);
        written += 1;
    }
    Ok(written)
}
