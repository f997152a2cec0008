//! Output formatting module

mod json;
mod markdown;
mod sarif;
mod text;

use miette::Result;

use crate::cli::OutputFormat;
use crate::runner::{Document, Mode};

/// Prints results in the requested format.
///
/// `wrote` tells the text summary whether changes were written to disk.
pub fn output_documents(
    documents: &[Document],
    format: OutputFormat,
    mode: Mode,
    wrote: bool,
) -> Result<()> {
    match format {
        OutputFormat::Sarif => sarif::output_sarif(documents)?,
        OutputFormat::Json => json::output_json(documents)?,
        OutputFormat::Markdown => markdown::output_markdown(documents),
        OutputFormat::Text => text::output_text(documents, mode, wrote),
    }
    Ok(())
}
