//! Writing rules (lint only).
//!
//! The scanners here are shared with the academic family, which reports the
//! same findings under its own rule ids and message keys.

use crate::rule::{FormatRule, RuleCategory, RuleKind};
use crate::scan::scan;
use crate::{LintResult, RuleOptions, Severity};

pub const HEADING_DEPTH: &str = "heading-depth";
pub const LONG_PARAGRAPH: &str = "long-paragraph";

pub(crate) fn rules() -> Vec<FormatRule> {
    vec![
        FormatRule::new(
            HEADING_DEPTH,
            RuleCategory::Writing,
            RuleKind::LintOnly(lint_heading_depth),
        )
        .named("Heading depth")
        .describe("Flag headings nested deeper than the configured maximum"),
        FormatRule::new(
            LONG_PARAGRAPH,
            RuleCategory::Writing,
            RuleKind::LintOnly(lint_long_paragraph),
        )
        .named("Long paragraph")
        .describe("Flag paragraphs longer than the configured character budget"),
    ]
}

fn lint_heading_depth(content: &str, options: &RuleOptions) -> Vec<LintResult> {
    find_deep_headings(
        content,
        options.max_heading_depth,
        HEADING_DEPTH,
        "writing.headingDepth.tooDeep",
    )
}

fn lint_long_paragraph(content: &str, options: &RuleOptions) -> Vec<LintResult> {
    find_long_paragraphs(
        content,
        options.max_paragraph_chars,
        LONG_PARAGRAPH,
        "writing.longParagraph.tooLong",
    )
}

/// Reports every heading whose level exceeds `max_depth`.
pub(crate) fn find_deep_headings(
    content: &str,
    max_depth: usize,
    rule_id: &str,
    message_key: &str,
) -> Vec<LintResult> {
    scan(content)
        .iter()
        .filter_map(|line| {
            let heading = line.heading()?;
            (heading.level > max_depth).then(|| {
                LintResult::new(
                    rule_id,
                    message_key,
                    format!(
                        "Heading level {} exceeds the maximum depth of {}",
                        heading.level, max_depth
                    ),
                    line.number,
                )
            })
        })
        .collect()
}

/// Reports paragraphs whose trimmed character count exceeds `max_chars`.
///
/// A paragraph is a run of non-blank, non-heading lines outside fenced code.
pub(crate) fn find_long_paragraphs(
    content: &str,
    max_chars: usize,
    rule_id: &str,
    message_key: &str,
) -> Vec<LintResult> {
    let mut results = Vec::new();
    let mut span: Vec<usize> = Vec::new();
    let mut chars = 0usize;

    let mut flush = |span: &mut Vec<usize>, chars: &mut usize| {
        if *chars > max_chars
            && let Some(first) = span.first().copied()
        {
            results.push(
                LintResult::new(
                    rule_id,
                    message_key,
                    format!("Paragraph has {} characters (limit {})", chars, max_chars),
                    first,
                )
                .with_lines(std::mem::take(span))
                .with_severity(Severity::Info),
            );
        }
        span.clear();
        *chars = 0;
    };

    for line in scan(content) {
        if line.is_code() || line.is_blank() || line.heading().is_some() {
            flush(&mut span, &mut chars);
            continue;
        }
        span.push(line.number);
        chars += line.text.trim().chars().count();
    }
    flush(&mut span, &mut chars);

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flags_headings_beyond_max_depth() {
        let content = "# A\n#### B\n##### C\n```\n###### code\n```\n";
        let results = lint_heading_depth(content, &RuleOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].line, 3);
        assert_eq!(results[0].message_key, "writing.headingDepth.tooDeep");
    }

    #[test]
    fn respects_configured_depth() {
        let options = RuleOptions::default().with_max_heading_depth(2);
        let results = lint_heading_depth("# A\n## B\n### C\n", &options);
        let lines: Vec<usize> = results.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3]);
    }

    #[test]
    fn long_paragraph_reports_full_span() {
        let options = RuleOptions::default().with_max_paragraph_chars(10);
        let content = "short\n\nthis line\nis long enough\n# Heading\nok\n";
        let results = lint_long_paragraph(content, &options);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].line, 3);
        assert_eq!(results[0].lines, Some(vec![3, 4]));
        assert_eq!(results[0].severity, Severity::Info);
        assert_eq!(results[0].message, "Paragraph has 23 characters (limit 10)");
    }

    #[test]
    fn long_paragraph_counts_chars_not_bytes() {
        let options = RuleOptions::default().with_max_paragraph_chars(5);
        assert!(lint_long_paragraph("日本語です\n", &options).is_empty());
        assert_eq!(lint_long_paragraph("日本語ですね\n", &options).len(), 1);
    }

    #[test]
    fn long_paragraph_ignores_fenced_code() {
        let options = RuleOptions::default().with_max_paragraph_chars(3);
        assert!(lint_long_paragraph("```\nlong code line\n```\n", &options).is_empty());
    }
}
