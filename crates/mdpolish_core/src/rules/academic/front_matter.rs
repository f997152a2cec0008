//! Abstract and keyword sections.
//!
//! A section is either a heading (`## Abstract`) followed by body lines up to
//! the next heading, or an inline label (`**Keywords:** a, b`) whose body is
//! the rest of that paragraph.

use std::sync::LazyLock;

use regex::Regex;

use super::numbering::strip_section_number;
use super::{ABSTRACT_FORMAT, KEYWORDS_FORMAT};
use crate::scan::{ScannedLine, scan};
use crate::{LintResult, RuleOptions};

const MAX_KEYWORDS: usize = 12;
const KEYWORD_SEPARATORS: [char; 5] = [',', ';', '，', '；', '、'];

static ABSTRACT_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:abstract|摘要)\s*[:：]?$").expect("Invalid regex pattern for abstract")
});

static KEYWORDS_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:keywords|key words|index terms|关键词)\s*[:：]?$")
        .expect("Invalid regex pattern for keywords")
});

static INLINE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[*_]*(abstract|摘要|keywords|key words|index terms|关键词)[*_]*\s*[:：—\-]\s*[*_]*\s*(.*)$",
    )
    .expect("Invalid regex pattern for inline section labels")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Abstract,
    Keywords,
}

impl SectionKind {
    fn title(self) -> &'static Regex {
        match self {
            Self::Abstract => &*ABSTRACT_TITLE,
            Self::Keywords => &*KEYWORDS_TITLE,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Section<'a> {
    line: usize,
    body: Vec<&'a str>,
}

impl Section<'_> {
    fn is_empty(&self) -> bool {
        self.body.iter().all(|text| text.trim().is_empty())
    }
}

fn find_section<'a>(lines: &[ScannedLine<'a>], kind: SectionKind) -> Option<Section<'a>> {
    for (idx, line) in lines.iter().enumerate() {
        if line.is_code() {
            continue;
        }

        if let Some(heading) = line.heading() {
            if kind.title().is_match(strip_section_number(heading.text)) {
                let body = lines[idx + 1..]
                    .iter()
                    .take_while(|next| next.heading().is_none())
                    .filter(|next| !next.is_blank())
                    .map(|next| next.text)
                    .collect();
                return Some(Section {
                    line: line.number,
                    body,
                });
            }
            continue;
        }

        if let Some(caps) = INLINE_LABEL.captures(line.text)
            && kind.title().is_match(&caps[1])
        {
            let first = caps.get(2).map_or("", |m| m.as_str());
            let body = std::iter::once(first)
                .chain(
                    lines[idx + 1..]
                        .iter()
                        .take_while(|next| {
                            !next.is_code() && !next.is_blank() && next.heading().is_none()
                        })
                        .map(|next| next.text),
                )
                .collect();
            return Some(Section {
                line: line.number,
                body,
            });
        }
    }
    None
}

fn missing(rule_id: &str, key: &str, message: &str, content: &str) -> Vec<LintResult> {
    if content.trim().is_empty() {
        Vec::new()
    } else {
        vec![LintResult::new(rule_id, key, message, 1)]
    }
}

pub(super) fn lint_abstract(content: &str, _options: &RuleOptions) -> Vec<LintResult> {
    let lines = scan(content);
    match find_section(&lines, SectionKind::Abstract) {
        None => missing(
            ABSTRACT_FORMAT,
            "academic.abstract.missing",
            "Document has no Abstract section",
            content,
        ),
        Some(section) if section.is_empty() => vec![LintResult::new(
            ABSTRACT_FORMAT,
            "academic.abstract.empty",
            "Abstract section is empty",
            section.line,
        )],
        Some(_) => Vec::new(),
    }
}

fn split_keywords(body: &[&str]) -> Vec<String> {
    body.iter()
        .flat_map(|text| text.split(KEYWORD_SEPARATORS))
        .map(|item| item.trim().trim_matches(['*', '_', '.', '。']).trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub(super) fn lint_keywords(content: &str, _options: &RuleOptions) -> Vec<LintResult> {
    let lines = scan(content);
    let Some(section) = find_section(&lines, SectionKind::Keywords) else {
        return missing(
            KEYWORDS_FORMAT,
            "academic.keywords.missing",
            "Document has no Keywords section",
            content,
        );
    };

    if section.is_empty() {
        return vec![LintResult::new(
            KEYWORDS_FORMAT,
            "academic.keywords.empty",
            "Keywords section is empty",
            section.line,
        )];
    }

    let keywords = split_keywords(&section.body);
    if keywords.is_empty() {
        vec![LintResult::new(
            KEYWORDS_FORMAT,
            "academic.keywords.format",
            "Keywords should be a list separated by commas or semicolons",
            section.line,
        )]
    } else if keywords.len() > MAX_KEYWORDS {
        vec![LintResult::new(
            KEYWORDS_FORMAT,
            "academic.keywords.count",
            format!(
                "Too many keywords: {} (at most {})",
                keywords.len(),
                MAX_KEYWORDS
            ),
            section.line,
        )]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn keys(results: Vec<LintResult>) -> Vec<(usize, String)> {
        results.into_iter().map(|r| (r.line, r.message_key)).collect()
    }

    fn opts() -> RuleOptions {
        RuleOptions::default()
    }

    #[rstest]
    #[case("# Title\n\n## Abstract\n\nWe study things.\n\n## 1 Intro\n")]
    #[case("# Title\n\n**Abstract:** We study things.\n")]
    #[case("## 摘要\n本文研究。\n")]
    fn abstract_present(#[case] content: &str) {
        assert!(lint_abstract(content, &opts()).is_empty());
    }

    #[test]
    fn abstract_missing_and_empty() {
        assert_eq!(
            keys(lint_abstract("# Title\n\ntext\n", &opts())),
            vec![(1, "academic.abstract.missing".to_string())]
        );
        assert_eq!(
            keys(lint_abstract("# Title\n## Abstract\n\n## Intro\n", &opts())),
            vec![(2, "academic.abstract.empty".to_string())]
        );
        assert!(lint_abstract("", &opts()).is_empty());
        assert!(lint_abstract("\n\n", &opts()).is_empty());
    }

    #[test]
    fn keywords_split_on_all_separators() {
        let items = split_keywords(&["a, b; c", "数据，模型；学习、推理"]);
        assert_eq!(items, vec!["a", "b", "c", "数据", "模型", "学习", "推理"]);
    }

    #[rstest]
    #[case("## Keywords\n\nmachine learning, NLP\n", vec![])]
    #[case("*Index Terms*: parsing; lexing\n", vec![])]
    #[case("text only\n", vec![(1, "academic.keywords.missing")])]
    #[case("## Keywords\n\n## Intro\n", vec![(1, "academic.keywords.empty")])]
    #[case("## Keywords\n, ;\n", vec![(1, "academic.keywords.format")])]
    #[case("Keywords: a, b, c, d, e, f, g, h, i, j, k, l, m\n", vec![(1, "academic.keywords.count")])]
    fn keywords_checks(#[case] content: &str, #[case] expected: Vec<(usize, &str)>) {
        let expected: Vec<(usize, String)> = expected
            .into_iter()
            .map(|(line, key)| (line, key.to_string()))
            .collect();
        assert_eq!(keys(lint_keywords(content, &opts())), expected);
    }
}
