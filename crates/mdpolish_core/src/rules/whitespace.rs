//! Whitespace rules.

use crate::rule::{FormatRule, RuleCategory, RuleKind};
use crate::scan::{FenceLine, FenceTracker, is_blank, join_lines, scan, split_lines};
use crate::{LintResult, RuleOptions};

pub const TRAILING_SPACES: &str = "trailing-spaces";
pub const CONSECUTIVE_BLANKS: &str = "consecutive-blanks";
pub const FINAL_NEWLINE: &str = "final-newline";

pub(crate) fn rules() -> Vec<FormatRule> {
    vec![
        FormatRule::new(
            TRAILING_SPACES,
            RuleCategory::Whitespace,
            RuleKind::FixAndLint(fix_trailing_spaces, lint_trailing_spaces),
        )
        .named("Trailing spaces")
        .describe("Strip trailing spaces and tabs outside fenced code"),
        FormatRule::new(
            CONSECUTIVE_BLANKS,
            RuleCategory::Whitespace,
            RuleKind::FixAndLint(fix_consecutive_blanks, lint_consecutive_blanks),
        )
        .named("Consecutive blank lines")
        .describe("Collapse runs of blank lines into a single blank line"),
        FormatRule::new(
            FINAL_NEWLINE,
            RuleCategory::Whitespace,
            RuleKind::FixOnly(fix_final_newline),
        )
        .named("Final newline")
        .describe("End the document with exactly one newline"),
    ]
}

fn fix_trailing_spaces(content: &str, _options: &RuleOptions) -> String {
    let (lines, trailing_newline) = split_lines(content);
    let mut tracker = FenceTracker::new();
    let fixed: Vec<&str> = lines
        .into_iter()
        .map(|line| {
            if tracker.classify(line) == FenceLine::Inside {
                line
            } else {
                line.trim_end_matches([' ', '\t'])
            }
        })
        .collect();
    join_lines(&fixed, trailing_newline)
}

fn lint_trailing_spaces(content: &str, _options: &RuleOptions) -> Vec<LintResult> {
    scan(content)
        .into_iter()
        .filter(|line| line.fence != FenceLine::Inside)
        .filter(|line| line.text.ends_with([' ', '\t']))
        .map(|line| {
            LintResult::new(
                TRAILING_SPACES,
                "whitespace.trailingSpaces.found",
                "Line has trailing whitespace",
                line.number,
            )
        })
        .collect()
}

fn fix_consecutive_blanks(content: &str, _options: &RuleOptions) -> String {
    let (lines, trailing_newline) = split_lines(content);
    let mut tracker = FenceTracker::new();
    let mut fixed: Vec<&str> = Vec::with_capacity(lines.len());
    let mut previous_blank = false;

    for line in lines {
        let fence = tracker.classify(line);
        let blank = !fence.is_code() && is_blank(line);
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        fixed.push(line);
    }

    join_lines(&fixed, trailing_newline)
}

fn lint_consecutive_blanks(content: &str, _options: &RuleOptions) -> Vec<LintResult> {
    let mut results = Vec::new();
    let mut run: Vec<usize> = Vec::new();

    for line in scan(content) {
        if !line.is_code() && line.is_blank() {
            run.push(line.number);
        } else {
            flush_blank_run(&mut run, &mut results);
        }
    }
    flush_blank_run(&mut run, &mut results);

    results
}

fn flush_blank_run(run: &mut Vec<usize>, results: &mut Vec<LintResult>) {
    if run.len() > 1 {
        results.push(
            LintResult::new(
                CONSECUTIVE_BLANKS,
                "whitespace.consecutiveBlanks.found",
                format!("{} consecutive blank lines", run.len()),
                run[1],
            )
            .with_lines(run.clone()),
        );
    }
    run.clear();
}

fn fix_final_newline(content: &str, _options: &RuleOptions) -> String {
    let body = content.trim_end_matches('\n');
    if body.is_empty() {
        return String::new();
    }
    format!("{body}\n")
}
