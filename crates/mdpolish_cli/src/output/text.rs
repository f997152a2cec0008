//! Text output formatter

use mdpolish_core::Severity;

use crate::runner::{Document, Mode};

pub fn output_text(documents: &[Document], mode: Mode, wrote: bool) {
    for document in documents {
        let result = &document.result;
        if !result.has_changes && !result.has_issues() {
            continue;
        }

        println!("\n{}:", document.display);
        if result.has_changes {
            let action = if wrote { "formatted" } else { "would reformat" };
            println!("  {} ({})", action, result.applied_rules.join(", "));
        }
        for issue in &result.lint_results {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info => "info",
            };
            println!(
                "  {}:{} {} [{}]: {}",
                document.display, issue.line, severity, issue.rule_id, issue.message
            );
        }
    }

    let total_files = documents.len();
    let total_issues: usize = documents.iter().map(|d| d.result.issue_count()).sum();

    println!();
    match mode {
        Mode::Format => {
            let changed = documents.iter().filter(|d| d.changed()).count();
            let verb = if wrote { "formatted" } else { "would change" };
            println!(
                "Checked {} files, {} {}, found {} issues",
                total_files, changed, verb, total_issues
            );
        }
        Mode::Lint => println!("Checked {} files, found {} issues", total_files, total_issues),
    }
}
