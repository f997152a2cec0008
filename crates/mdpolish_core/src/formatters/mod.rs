//! Report exporters for [`FormatResult`](crate::FormatResult).

pub mod json;
pub mod markdown;
pub mod sarif;

pub use json::export_to_json;
pub use markdown::export_to_markdown;
pub use sarif::{SarifLog, export_to_sarif, export_to_sarif_with_uri, generate_sarif};
