//! Figure and table captions (`Figure 1: ...`, `Table 2. ...`).

use super::{FIGURE_CAPTION_FORMAT, TABLE_CAPTION_FORMAT};
use crate::scan::scan;
use crate::{LintResult, RuleOptions};

const EMPHASIS: [char; 2] = ['*', '_'];
const PUNCTUATION: [char; 8] = [':', '.', '：', '。', '-', '–', '—', '|'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaptionKind {
    Figure,
    Table,
}

impl CaptionKind {
    /// Accepted labels, longest first so `fig.` wins over `fig`.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Figure => &["figure", "fig.", "fig", "图"],
            Self::Table => &["table", "tab.", "tab", "表"],
        }
    }

    fn rule_id(self) -> &'static str {
        match self {
            Self::Figure => FIGURE_CAPTION_FORMAT,
            Self::Table => TABLE_CAPTION_FORMAT,
        }
    }

    fn key_prefix(self) -> &'static str {
        match self {
            Self::Figure => "academic.figureCaption",
            Self::Table => "academic.tableCaption",
        }
    }

    fn format(self, options: &RuleOptions) -> CaptionFormat {
        match self {
            Self::Figure => CaptionFormat::parse(&options.figure_format),
            Self::Table => CaptionFormat::parse(&options.table_format),
        }
    }
}

/// The label and punctuation expected in a caption, parsed from a sample
/// such as `"Figure 1:"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CaptionFormat {
    pub label: String,
    pub punctuation: String,
}

impl CaptionFormat {
    pub(crate) fn parse(sample: &str) -> Self {
        let sample = sample.trim();
        match sample.find(|c: char| c.is_ascii_digit()) {
            Some(start) => {
                let after = &sample[start..];
                let digits = after.bytes().take_while(u8::is_ascii_digit).count();
                Self {
                    label: sample[..start].trim().to_string(),
                    punctuation: after[digits..].trim().to_string(),
                }
            }
            None => Self {
                label: sample.to_string(),
                punctuation: String::new(),
            },
        }
    }
}

/// A parsed caption line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Caption<'a> {
    pub label: &'a str,
    pub number: u32,
    pub punctuation: &'a str,
    pub text: &'a str,
}

fn strip_label<'a>(line: &'a str, candidates: &[&str]) -> Option<(&'a str, &'a str)> {
    candidates.iter().find_map(|candidate| {
        let head = line.get(..candidate.len())?;
        if !head.to_lowercase().eq(&candidate.to_lowercase()) {
            return None;
        }
        let rest = &line[candidate.len()..];
        let boundary = rest
            .chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c.is_ascii_digit() || EMPHASIS.contains(&c));
        boundary.then_some((head, rest))
    })
}

pub(crate) fn parse_caption<'a>(
    line: &'a str,
    kind: CaptionKind,
    format: &CaptionFormat,
) -> Option<Caption<'a>> {
    let line = line.trim_start().trim_start_matches(EMPHASIS);

    let mut candidates: Vec<&str> = kind.aliases().to_vec();
    if !format.label.is_empty() {
        candidates.push(&format.label);
    }
    candidates.sort_by_key(|candidate| std::cmp::Reverse(candidate.len()));

    let (label, rest) = strip_label(line, &candidates)?;
    let rest = rest.trim_start_matches(|c: char| c.is_whitespace() || EMPHASIS.contains(&c));

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let number = rest[..digits].parse().ok()?;
    let rest = rest[digits..].trim_start_matches(EMPHASIS);

    let punctuation_len = rest
        .chars()
        .next()
        .filter(|c| PUNCTUATION.contains(c))
        .map_or(0, char::len_utf8);
    let punctuation = &rest[..punctuation_len];
    let text = rest[punctuation_len..]
        .trim_matches(|c: char| c.is_whitespace() || EMPHASIS.contains(&c));

    Some(Caption {
        label,
        number,
        punctuation,
        text,
    })
}

/// Every caption of `kind` outside fenced code, with its line number.
pub(crate) fn find_captions<'a>(
    content: &'a str,
    kind: CaptionKind,
    options: &RuleOptions,
) -> Vec<(usize, Caption<'a>)> {
    let format = kind.format(options);
    scan(content)
        .into_iter()
        .filter(|line| !line.is_code() && line.heading().is_none())
        .filter_map(|line| parse_caption(line.text, kind, &format).map(|c| (line.number, c)))
        .collect()
}

fn lint_captions(content: &str, kind: CaptionKind, options: &RuleOptions) -> Vec<LintResult> {
    let format = kind.format(options);
    let mut results = Vec::new();
    let mut last = 0u64;

    for (line, caption) in find_captions(content, kind, options) {
        let expected = last + 1;
        let issue = if !format.label.is_empty() && caption.label != format.label {
            Some((
                "label",
                format!("Caption label should be '{}', found '{}'", format.label, caption.label),
            ))
        } else if caption.punctuation != format.punctuation {
            Some((
                "punctuation",
                format!(
                    "Caption number should be followed by '{}', found '{}'",
                    format.punctuation, caption.punctuation
                ),
            ))
        } else if u64::from(caption.number) != expected {
            Some((
                "sequence",
                format!("Expected caption number {expected}, found {}", caption.number),
            ))
        } else if caption.text.is_empty() {
            Some(("empty", "Caption has no text".to_string()))
        } else {
            None
        };

        if let Some((kind_key, message)) = issue {
            results.push(LintResult::new(
                kind.rule_id(),
                format!("{}.{}", kind.key_prefix(), kind_key),
                message,
                line,
            ));
        }
        last = u64::from(caption.number);
    }

    results
}

pub(super) fn lint_figure_captions(content: &str, options: &RuleOptions) -> Vec<LintResult> {
    lint_captions(content, CaptionKind::Figure, options)
}

pub(super) fn lint_table_captions(content: &str, options: &RuleOptions) -> Vec<LintResult> {
    lint_captions(content, CaptionKind::Table, options)
}
