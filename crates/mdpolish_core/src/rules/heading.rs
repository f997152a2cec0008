//! Heading rules.

use crate::rule::{FormatRule, RuleCategory, RuleKind};
use crate::scan::{FenceTracker, is_blank, join_lines, parse_heading, scan, split_lines};
use crate::{LintResult, RuleOptions};

pub const HEADING_SPACE: &str = "heading-space";
pub const HEADING_BLANK_LINES: &str = "heading-blank-lines";

pub(crate) fn rules() -> Vec<FormatRule> {
    vec![
        FormatRule::new(
            HEADING_SPACE,
            RuleCategory::Heading,
            RuleKind::FixAndLint(fix_heading_space, lint_heading_space),
        )
        .named("Heading space")
        .describe("Exactly one space after the # markers"),
        FormatRule::new(
            HEADING_BLANK_LINES,
            RuleCategory::Heading,
            RuleKind::FixOnly(fix_heading_blank_lines),
        )
        .named("Blank lines around headings")
        .describe("Exactly one blank line before and after each heading"),
    ]
}

/// Rewrites `#Title` / `#   Title` into `# Title`. Returns `None` when the
/// line is not a heading or is already well-formed.
fn normalize_heading_space(line: &str) -> Option<String> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    let text = rest.trim_start_matches([' ', '\t']);
    if text.is_empty() || (rest.len() == text.len() + 1 && rest.starts_with(' ')) {
        return None;
    }
    Some(format!("{} {}", &line[..level], text))
}

fn fix_heading_space(content: &str, _options: &RuleOptions) -> String {
    let (lines, trailing_newline) = split_lines(content);
    let mut tracker = FenceTracker::new();
    let fixed: Vec<String> = lines
        .into_iter()
        .map(|line| {
            if tracker.classify(line).is_code() {
                return line.to_string();
            }
            normalize_heading_space(line).unwrap_or_else(|| line.to_string())
        })
        .collect();
    join_lines(&fixed, trailing_newline)
}

fn lint_heading_space(content: &str, _options: &RuleOptions) -> Vec<LintResult> {
    scan(content)
        .into_iter()
        .filter(|line| !line.is_code() && normalize_heading_space(line.text).is_some())
        .map(|line| {
            LintResult::new(
                HEADING_SPACE,
                "heading.headingSpace.invalid",
                "Heading markers must be followed by exactly one space",
                line.number,
            )
        })
        .collect()
}

fn fix_heading_blank_lines(content: &str, _options: &RuleOptions) -> String {
    let (lines, trailing_newline) = split_lines(content);
    let mut tracker = FenceTracker::new();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut skip_blanks = false;

    for (idx, line) in lines.iter().copied().enumerate() {
        let fence = tracker.classify(line);

        if skip_blanks {
            if !fence.is_code() && is_blank(line) {
                continue;
            }
            skip_blanks = false;
        }

        if fence.is_code() || parse_heading(line).is_none() {
            out.push(line);
            continue;
        }

        while out.last().is_some_and(|prev| is_blank(prev)) {
            out.pop();
        }
        if !out.is_empty() {
            out.push("");
        }
        out.push(line);

        let has_content_after = lines[idx + 1..].iter().any(|next| !is_blank(next));
        if has_content_after {
            out.push("");
            skip_blanks = true;
        } else {
            break;
        }
    }

    join_lines(&out, trailing_newline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn opts() -> RuleOptions {
        RuleOptions::default()
    }

    #[rstest]
    #[case("#Title\n##Sub\n", "# Title\n## Sub\n")]
    #[case("#   Spaced\n", "# Spaced\n")]
    #[case("#\tTabbed\n", "# Tabbed\n")]
    #[case("# Fine\n", "# Fine\n")]
    #[case("#######Seven\n", "#######Seven\n")]
    #[case("#\n", "#\n")]
    #[case("```\n#comment\n```\n", "```\n#comment\n```\n")]
    fn heading_space_fix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fix_heading_space(input, &opts()), expected);
    }

    #[test]
    fn heading_space_lint_flags_missing_space() {
        let results = lint_heading_space("#Title\n## Ok\n###  Two\n", &opts());
        let lines: Vec<usize> = results.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[rstest]
    #[case("text\n# Title\nbody\n", "text\n\n# Title\n\nbody\n")]
    #[case("# Title\n\n\n\nbody\n", "# Title\n\nbody\n")]
    #[case("# A\n## B\n", "# A\n\n## B\n")]
    #[case("intro\n\n\n# Last\n\n", "intro\n\n# Last\n")]
    #[case("# Only\n", "# Only\n")]
    #[case("```\n# x\ny\n```\n", "```\n# x\ny\n```\n")]
    fn heading_blank_lines_fix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fix_heading_blank_lines(input, &opts()), expected);
    }

    #[test]
    fn heading_blank_lines_is_idempotent() {
        let once = fix_heading_blank_lines("a\n# T\nb\n## U\n\n\nc", &opts());
        assert_eq!(fix_heading_blank_lines(&once, &opts()), once);
    }
}
