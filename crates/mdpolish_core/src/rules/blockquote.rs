//! Blockquote rules.
//!
//! A quote prefix is one or more runs of `>` separated by optional
//! whitespace, e.g. `> >  text` has the runs `>` and `>`.

use crate::RuleOptions;
use crate::rule::{FormatRule, RuleCategory, RuleKind};
use crate::scan::{FenceTracker, join_lines, split_lines};

pub const BLOCKQUOTE_SPACE: &str = "blockquote-space";
pub const BLOCKQUOTE_NESTED: &str = "blockquote-nested";

pub(crate) fn rules() -> Vec<FormatRule> {
    vec![
        FormatRule::new(
            BLOCKQUOTE_SPACE,
            RuleCategory::Blockquote,
            RuleKind::FixOnly(fix_blockquote_space),
        )
        .named("Blockquote space")
        .describe("Exactly one space after each '>' run when content follows"),
        FormatRule::new(
            BLOCKQUOTE_NESTED,
            RuleCategory::Blockquote,
            RuleKind::FixOnly(fix_blockquote_nested),
        )
        .named("Nested blockquote")
        .describe("Write nested quote markers without spaces ('>>')"),
    ]
}

#[derive(Debug, PartialEq, Eq)]
struct QuotePrefix<'a> {
    indent: &'a str,
    runs: Vec<&'a str>,
    /// Whitespace following the last run.
    final_gap: &'a str,
    content: &'a str,
}

fn parse_quote_prefix(line: &str) -> Option<QuotePrefix<'_>> {
    let mut cursor = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - cursor.len()];
    if indent.len() >= 4 || !cursor.starts_with('>') {
        return None;
    }

    let mut runs = Vec::new();
    let final_gap = loop {
        let run_len = cursor.bytes().take_while(|b| *b == b'>').count();
        runs.push(&cursor[..run_len]);
        cursor = &cursor[run_len..];

        let after = cursor.trim_start_matches([' ', '\t']);
        let gap = &cursor[..cursor.len() - after.len()];
        cursor = after;
        if !cursor.starts_with('>') {
            break gap;
        }
    };

    Some(QuotePrefix {
        indent,
        runs,
        final_gap,
        content: cursor,
    })
}

fn map_quote_lines(content: &str, rewrite: fn(&QuotePrefix<'_>) -> String) -> String {
    let (lines, trailing_newline) = split_lines(content);
    let mut tracker = FenceTracker::new();
    let fixed: Vec<String> = lines
        .into_iter()
        .map(|line| {
            if tracker.classify(line).is_code() {
                return line.to_string();
            }
            match parse_quote_prefix(line) {
                Some(prefix) => rewrite(&prefix),
                None => line.to_string(),
            }
        })
        .collect();
    join_lines(&fixed, trailing_newline)
}

fn fix_blockquote_space(content: &str, _options: &RuleOptions) -> String {
    map_quote_lines(content, |prefix| {
        let markers = prefix.runs.join(" ");
        if prefix.content.is_empty() {
            format!("{}{}", prefix.indent, markers)
        } else {
            format!("{}{} {}", prefix.indent, markers, prefix.content)
        }
    })
}

fn fix_blockquote_nested(content: &str, _options: &RuleOptions) -> String {
    map_quote_lines(content, |prefix| {
        format!(
            "{}{}{}{}",
            prefix.indent,
            prefix.runs.concat(),
            prefix.final_gap,
            prefix.content
        )
    })
}
