//! Code block rules.

use crate::RuleOptions;
use crate::rule::{FormatRule, RuleCategory, RuleKind};
use crate::scan::{FenceLine, FenceToken, FenceTracker, is_blank, join_lines, split_lines};

pub const CODE_FENCE_STYLE: &str = "code-fence-style";
pub const CODE_BLOCK_PADDING: &str = "code-block-padding";

pub(crate) fn rules() -> Vec<FormatRule> {
    vec![
        FormatRule::new(
            CODE_FENCE_STYLE,
            RuleCategory::CodeBlock,
            RuleKind::FixOnly(fix_code_fence_style),
        )
        .named("Code fence style")
        .describe("Use backtick fences instead of tildes"),
        FormatRule::new(
            CODE_BLOCK_PADDING,
            RuleCategory::CodeBlock,
            RuleKind::FixOnly(fix_code_block_padding),
        )
        .named("Code block padding")
        .describe("Exactly one blank line before and after fenced code blocks"),
    ]
}

/// Rewrites a `~~~` delimiter into a backtick delimiter of the same length.
fn tilde_to_backticks(line: &str) -> Option<String> {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let width = body.chars().take_while(|c| *c == '~').count();
    let info = &body[width..];
    // Backtick fences cannot carry backticks in their info string.
    if info.contains('`') {
        return None;
    }
    Some(format!("{indent}{}{info}", "`".repeat(width)))
}

fn fix_code_fence_style(content: &str, _options: &RuleOptions) -> String {
    let (lines, trailing_newline) = split_lines(content);
    let mut fixed: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
    let mut tracker = FenceTracker::new();
    let mut open_tilde: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate() {
        let fence = tracker.classify(line);
        match fence {
            FenceLine::Open if tracker.token() == Some(FenceToken::Tilde) => {
                open_tilde = Some(idx);
            }
            FenceLine::Close => {
                let Some(start) = open_tilde.take() else {
                    continue;
                };
                let body_has_backticks = lines[start + 1..idx]
                    .iter()
                    .any(|inner| FenceToken::detect(inner) == Some(FenceToken::Backtick));
                if body_has_backticks {
                    continue;
                }
                if let (Some(open), Some(close)) =
                    (tilde_to_backticks(lines[start]), tilde_to_backticks(line))
                {
                    fixed[start] = open;
                    fixed[idx] = close;
                }
            }
            _ => {}
        }
    }

    join_lines(&fixed, trailing_newline)
}

fn fix_code_block_padding(content: &str, _options: &RuleOptions) -> String {
    let (lines, trailing_newline) = split_lines(content);
    let mut tracker = FenceTracker::new();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut pending_blank = false;

    for line in lines {
        match tracker.classify(line) {
            FenceLine::Open => {
                while out.last().is_some_and(|prev| is_blank(prev)) {
                    out.pop();
                }
                if !out.is_empty() {
                    out.push("");
                }
                out.push(line);
                pending_blank = false;
            }
            FenceLine::Inside => out.push(line),
            FenceLine::Close => {
                out.push(line);
                pending_blank = true;
            }
            FenceLine::Outside => {
                if pending_blank {
                    if is_blank(line) {
                        continue;
                    }
                    out.push("");
                    pending_blank = false;
                }
                out.push(line);
            }
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
    #[case("~~~\ncode\n~~~\n", "```\ncode\n```\n")]
    #[case("~~~~python\nx = 1\n~~~~\n", "````python\nx = 1\n````\n")]
    #[case("~~~md\n```\ninner\n```\n~~~\n", "~~~md\n```\ninner\n```\n~~~\n")]
    #[case("```\n~~~\n```\n", "```\n~~~\n```\n")]
    #[case("~~~\nunclosed\n", "~~~\nunclosed\n")]
    fn code_fence_style_fix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fix_code_fence_style(input, &opts()), expected);
    }

    #[rstest]
    #[case("text\n```\ncode\n```\nmore\n", "text\n\n```\ncode\n```\n\nmore\n")]
    #[case("text\n\n\n```\n\n\ncode\n```\n\n\nmore\n", "text\n\n```\n\n\ncode\n```\n\nmore\n")]
    #[case("```\ncode\n```\n\n", "```\ncode\n```\n")]
    #[case("```\na\n```\n```\nb\n```\n", "```\na\n```\n\n```\nb\n```\n")]
    #[case("text\n```\nopen\n\n", "text\n\n```\nopen\n\n")]
    fn code_block_padding_fix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fix_code_block_padding(input, &opts()), expected);
    }

    #[test]
    fn code_block_padding_is_idempotent() {
        let once = fix_code_block_padding("a\n~~~\nx\n~~~\nb\n```\ny\n```", &opts());
        assert_eq!(fix_code_block_padding(&once, &opts()), once);
    }
}
