//! SARIF output formatter

use miette::{IntoDiagnostic, Result};

use crate::runner::Document;

pub fn output_sarif(documents: &[Document]) -> Result<()> {
    let sarif_output = mdpolish_core::generate_sarif(
        documents
            .iter()
            .map(|d| (Some(d.display.as_str()), &d.result)),
    )
    .into_diagnostic()?;
    println!("{}", sarif_output);
    Ok(())
}
