//! SARIF 2.1.0 export.

use std::collections::HashSet;

use serde::Serialize;

use crate::{FormatResult, Severity};

const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
/// Artifact URI used when a document has no path of its own.
const UNNAMED_ARTIFACT_URI: &str = "document.md";

/// Root SARIF document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLog {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub tool: Tool,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub driver: ToolComponent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolComponent {
    pub name: String,
    pub version: String,
    pub rules: Vec<ReportingDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingDescriptor {
    pub id: String,
    pub name: String,
    pub short_description: Message,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub rule_id: String,
    pub level: String,
    pub message: Message,
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub physical_location: PhysicalLocation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalLocation {
    pub artifact_location: ArtifactLocation,
    pub region: Region,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactLocation {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub start_line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
}

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}

impl SarifLog {
    /// Builds one run covering every document.
    ///
    /// Rule descriptors appear once each, in first-seen order, described by
    /// the first message reported for the rule. Documents without a URI are
    /// attributed to `document.md`.
    pub fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = (Option<&'a str>, &'a FormatResult)>,
    {
        let mut rules = Vec::new();
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for (uri, result) in documents {
            for issue in &result.lint_results {
                if seen.insert(issue.rule_id.clone()) {
                    rules.push(ReportingDescriptor {
                        id: issue.rule_id.clone(),
                        name: issue.rule_id.clone(),
                        short_description: Message {
                            text: issue.message.clone(),
                        },
                    });
                }

                let end = issue.end_line();
                results.push(SarifResult {
                    rule_id: issue.rule_id.clone(),
                    level: level(issue.severity).to_string(),
                    message: Message {
                        text: issue.message.clone(),
                    },
                    locations: vec![Location {
                        physical_location: PhysicalLocation {
                            artifact_location: ArtifactLocation {
                                uri: uri.unwrap_or(UNNAMED_ARTIFACT_URI).to_string(),
                            },
                            region: Region {
                                start_line: issue.line,
                                end_line: (end > issue.line).then_some(end),
                            },
                        },
                    }],
                });
            }
        }

        SarifLog {
            schema: SARIF_SCHEMA.to_string(),
            version: SARIF_VERSION.to_string(),
            runs: vec![Run {
                tool: Tool {
                    driver: ToolComponent {
                        name: "mdpolish".to_string(),
                        version: option_env!("CARGO_PKG_VERSION")
                            .unwrap_or("0.0.0")
                            .to_string(),
                        rules,
                    },
                },
                results,
            }],
        }
    }

    /// Serializes the log as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Converts a single result attributed to a placeholder artifact.
pub fn export_to_sarif(result: &FormatResult) -> SarifLog {
    SarifLog::from_documents([(None, result)])
}

/// Converts a single result attributed to `uri`.
pub fn export_to_sarif_with_uri(uri: &str, result: &FormatResult) -> SarifLog {
    SarifLog::from_documents([(Some(uri), result)])
}

/// Generates SARIF JSON for a set of documents.
pub fn generate_sarif<'a, I>(documents: I) -> Result<String, serde_json::Error>
where
    I: IntoIterator<Item = (Option<&'a str>, &'a FormatResult)>,
{
    SarifLog::from_documents(documents).to_json()
}
