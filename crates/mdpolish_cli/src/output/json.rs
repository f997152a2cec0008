//! JSON output formatter

use miette::{IntoDiagnostic, Result};

use crate::runner::Document;

pub fn output_json(documents: &[Document]) -> Result<()> {
    let output: Vec<_> = documents
        .iter()
        .map(|d| {
            serde_json::json!({
                "path": d.display,
                "result": d.result,
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
