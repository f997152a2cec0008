//! List rules.

use crate::rule::{FormatRule, RuleCategory, RuleKind};
use crate::scan::{FenceTracker, is_blank, is_thematic_break, join_lines, scan, split_lines};
use crate::{LintResult, RuleOptions};

pub const LIST_MARKER: &str = "list-marker";
pub const LIST_INDENT: &str = "list-indent";

/// Spaces per nesting level.
const INDENT_STEP: usize = 4;

pub(crate) fn rules() -> Vec<FormatRule> {
    vec![
        FormatRule::new(
            LIST_MARKER,
            RuleCategory::List,
            RuleKind::FixAndLint(fix_list_marker, lint_list_marker),
        )
        .named("List marker")
        .describe("Use '-' for bullet list items"),
        FormatRule::new(LIST_INDENT, RuleCategory::List, RuleKind::FixOnly(fix_list_indent))
            .named("List indentation")
            .describe("Indent nested list items by four spaces per level"),
    ]
}

/// A list item line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListItem<'a> {
    /// Visual indentation (tabs count to the next multiple of four).
    pub indent: usize,
    /// Byte length of the leading whitespace.
    pub indent_len: usize,
    /// Bullet character, or `None` for ordered items.
    pub bullet: Option<char>,
    /// The line from the marker onward.
    pub body: &'a str,
}

pub(crate) fn parse_list_item(line: &str) -> Option<ListItem<'_>> {
    let body = line.trim_start_matches([' ', '\t']);
    let indent_len = line.len() - body.len();
    let indent = line[..indent_len].chars().fold(0usize, |acc, c| {
        if c == '\t' {
            (acc + 4) / 4 * 4
        } else {
            acc + 1
        }
    });

    let followed_by_space = |rest: &str| rest.is_empty() || rest.starts_with([' ', '\t']);

    let first = body.chars().next()?;
    let bullet = match first {
        '-' | '*' | '+' if followed_by_space(&body[1..]) => Some(first),
        '0'..='9' => {
            let digits = body.bytes().take_while(u8::is_ascii_digit).count();
            let rest = &body[digits..];
            if digits > 9 || !rest.starts_with(['.', ')']) || !followed_by_space(&rest[1..]) {
                return None;
            }
            None
        }
        _ => return None,
    };

    if bullet.is_some() && is_thematic_break(line) {
        return None;
    }

    Some(ListItem {
        indent,
        indent_len,
        bullet,
        body,
    })
}

fn fix_list_marker(content: &str, _options: &RuleOptions) -> String {
    let (lines, trailing_newline) = split_lines(content);
    let mut tracker = FenceTracker::new();
    let fixed: Vec<String> = lines
        .into_iter()
        .map(|line| {
            if tracker.classify(line).is_code() {
                return line.to_string();
            }
            match parse_list_item(line) {
                Some(item) if matches!(item.bullet, Some('*' | '+')) => {
                    format!("{}-{}", &line[..item.indent_len], &item.body[1..])
                }
                _ => line.to_string(),
            }
        })
        .collect();
    join_lines(&fixed, trailing_newline)
}

fn lint_list_marker(content: &str, _options: &RuleOptions) -> Vec<LintResult> {
    scan(content)
        .into_iter()
        .filter(|line| !line.is_code())
        .filter_map(|line| {
            let bullet = parse_list_item(line.text)?.bullet?;
            (bullet != '-').then(|| {
                LintResult::new(
                    LIST_MARKER,
                    "list.listMarker.inconsistent",
                    format!("Use '-' instead of '{bullet}' for list items"),
                    line.number,
                )
            })
        })
        .collect()
}

fn fix_list_indent(content: &str, _options: &RuleOptions) -> String {
    let (lines, trailing_newline) = split_lines(content);
    let mut tracker = FenceTracker::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut fixed: Vec<String> = Vec::with_capacity(lines.len());

    for line in lines {
        if tracker.classify(line).is_code() || is_blank(line) {
            fixed.push(line.to_string());
            continue;
        }

        let item = match parse_list_item(line) {
            // Indented code block, not a list.
            Some(item) if stack.is_empty() && item.indent >= INDENT_STEP => None,
            other => other,
        };

        let Some(item) = item else {
            if !line.starts_with([' ', '\t']) {
                stack.clear();
            }
            fixed.push(line.to_string());
            continue;
        };

        while stack.last().is_some_and(|top| *top > item.indent) {
            stack.pop();
        }
        if stack.last().is_none_or(|top| item.indent > *top) {
            stack.push(item.indent);
        }
        let depth = stack.len() - 1;
        fixed.push(format!("{}{}", " ".repeat(depth * INDENT_STEP), item.body));
    }

    join_lines(&fixed, trailing_newline)
}
