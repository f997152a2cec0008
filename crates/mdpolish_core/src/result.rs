//! Lint and format result types.

use serde::{Deserialize, Serialize};

/// Severity level for lint results.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    Error,
    /// Warning - should be reviewed.
    #[default]
    Warning,
    /// Info - informational message.
    Info,
}

/// A single issue reported by a lint rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    /// Identifier unique within one engine run (`{rule_id}-{n}`).
    #[serde(default)]
    pub id: String,

    /// The rule that generated this result.
    pub rule_id: String,

    /// Stable key the host uses to look up a localized message.
    pub message_key: String,

    /// Human-readable English fallback message.
    pub message: String,

    /// 1-based line number.
    pub line: usize,

    /// Full line span for multi-line issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<usize>>,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,
}

impl LintResult {
    /// Creates a new warning-level result. The id is assigned by the engine.
    pub fn new(
        rule_id: impl Into<String>,
        message_key: impl Into<String>,
        message: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            id: String::new(),
            rule_id: rule_id.into(),
            message_key: message_key.into(),
            message: message.into(),
            line,
            lines: None,
            severity: Severity::Warning,
        }
    }

    /// Sets the full line span.
    pub fn with_lines(mut self, lines: Vec<usize>) -> Self {
        self.lines = Some(lines);
        self
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Iterates over every line this result refers to.
    pub fn line_refs(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.line).chain(self.lines.iter().flatten().copied())
    }

    /// Returns the last line this result refers to.
    pub fn end_line(&self) -> usize {
        self.line_refs().max().unwrap_or(self.line)
    }
}

/// Result of one formatting invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatResult {
    /// Content after all enabled fix rules ran.
    pub formatted: String,

    /// Whether `formatted` differs from the input.
    pub has_changes: bool,

    /// Rules whose fix actually altered the content, in application order.
    pub applied_rules: Vec<String>,

    /// Lint results for the final content.
    pub lint_results: Vec<LintResult>,
}

impl FormatResult {
    /// Returns true if any lint result was reported.
    pub fn has_issues(&self) -> bool {
        !self.lint_results.is_empty()
    }

    /// Returns the number of lint results.
    pub fn issue_count(&self) -> usize {
        self.lint_results.len()
    }

    /// Counts lint results with the given severity.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.lint_results
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }
}
