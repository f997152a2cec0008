//! Markdown report export.

use std::fmt::Write;

use crate::{FormatResult, LintResult, Severity};

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
    }
}

fn line_label(result: &LintResult) -> String {
    let end = result.end_line();
    if end > result.line {
        format!("Lines {}-{}", result.line, end)
    } else {
        format!("Line {}", result.line)
    }
}

/// Renders a human-readable Markdown report.
///
/// Issues are grouped by rule id, groups ordered by first appearance.
pub fn export_to_markdown(result: &FormatResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# mdpolish report");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "- Changed: {}",
        if result.has_changes { "yes" } else { "no" }
    );
    let _ = writeln!(
        out,
        "- Issues: {} ({} errors, {} warnings, {} info)",
        result.issue_count(),
        result.count_severity(Severity::Error),
        result.count_severity(Severity::Warning),
        result.count_severity(Severity::Info),
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "## Applied rules");
    let _ = writeln!(out);
    if result.applied_rules.is_empty() {
        let _ = writeln!(out, "None.");
    }
    for rule in &result.applied_rules {
        let _ = writeln!(out, "- `{}`", rule);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Issues");
    if result.lint_results.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No issues found.");
        return out;
    }

    let mut groups: Vec<(&str, Vec<&LintResult>)> = Vec::new();
    for issue in &result.lint_results {
        match groups.iter_mut().find(|(id, _)| *id == issue.rule_id) {
            Some((_, items)) => items.push(issue),
            None => groups.push((issue.rule_id.as_str(), vec![issue])),
        }
    }

    for (rule_id, items) in groups {
        let _ = writeln!(out);
        let _ = writeln!(out, "### `{}`", rule_id);
        let _ = writeln!(out);
        for issue in items {
            let _ = writeln!(
                out,
                "- {} ({}): {}",
                line_label(issue),
                severity_label(issue.severity),
                issue.message
            );
        }
    }

    out
}
