//! Reference list section.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::REFERENCE_LIST_FORMAT;
use super::numbering::strip_section_number;
use crate::scan::{ScannedLine, scan};
use crate::{LintResult, RuleOptions};

static REFERENCE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:references|reference|bibliography|works cited|参考文献)\s*:?$")
        .expect("Invalid regex pattern for reference headings")
});

static NUMBERED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d+)\]").expect("Invalid regex pattern for numbered references")
});

static AUTHOR_YEAR_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Lu}[^()]*\((?:\d{4}[a-z]?|n\.d\.)\)")
        .expect("Invalid regex pattern for author-year references")
});

/// Index range (into `lines`) of the reference section body.
///
/// The section ends at the next heading of the same or a shallower level.
pub(crate) fn reference_section(lines: &[ScannedLine<'_>]) -> Option<Range<usize>> {
    let (start, level) = lines.iter().enumerate().find_map(|(idx, line)| {
        let heading = line.heading()?;
        REFERENCE_TITLE
            .is_match(strip_section_number(heading.text))
            .then_some((idx + 1, heading.level))
    })?;

    let end = lines[start..]
        .iter()
        .position(|line| line.heading().is_some_and(|h| h.level <= level))
        .map_or(lines.len(), |offset| start + offset);

    Some(start..end)
}

/// Entry lines of the reference section with list bullets stripped.
fn entries<'a>(lines: &[ScannedLine<'a>], range: Range<usize>) -> Vec<(usize, &'a str)> {
    lines[range]
        .iter()
        .filter(|line| {
            !line.is_code()
                && !line.is_blank()
                && line.heading().is_none()
                && !line.text.starts_with([' ', '\t'])
        })
        .map(|line| {
            let text = line.text;
            let text = ["- ", "* ", "+ "]
                .iter()
                .find_map(|bullet| text.strip_prefix(bullet))
                .unwrap_or(text);
            (line.number, text.trim())
        })
        .collect()
}

pub(super) fn lint_reference_list(content: &str, options: &RuleOptions) -> Vec<LintResult> {
    let lines = scan(content);
    let Some(range) = reference_section(&lines) else {
        return Vec::new();
    };

    let style = options.citation_style;
    let mut results = Vec::new();
    let mut last = 0u64;

    for (line, entry) in entries(&lines, range) {
        let number = NUMBERED_ENTRY
            .captures(entry)
            .and_then(|caps| caps[1].parse::<u32>().ok());

        if style.is_numeric() {
            let Some(number) = number else {
                results.push(LintResult::new(
                    REFERENCE_LIST_FORMAT,
                    "academic.referenceList.format",
                    format!(
                        "{} references should start with a bracketed number like [1]",
                        style.as_str().to_uppercase()
                    ),
                    line,
                ));
                continue;
            };
            if u64::from(number) != last + 1 {
                results.push(LintResult::new(
                    REFERENCE_LIST_FORMAT,
                    "academic.referenceList.sequence",
                    format!("Expected reference [{}], found [{}]", last + 1, number),
                    line,
                ));
            }
            last = u64::from(number);
        } else if number.is_some() {
            results.push(LintResult::new(
                REFERENCE_LIST_FORMAT,
                "academic.referenceList.numbered",
                "APA references should not be numbered",
                line,
            ));
        } else if !AUTHOR_YEAR_ENTRY.is_match(entry) {
            results.push(LintResult::new(
                REFERENCE_LIST_FORMAT,
                "academic.referenceList.format",
                "APA references should start with 'Author (Year)'",
                line,
            ));
        }
    }

    results
}
