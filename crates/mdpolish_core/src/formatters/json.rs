//! JSON export.

use crate::FormatResult;

/// Serializes the result as pretty-printed camelCase JSON.
pub fn export_to_json(result: &FormatResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
