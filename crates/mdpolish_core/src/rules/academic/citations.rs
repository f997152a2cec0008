//! In-text citation style.
//!
//! Both patterns are heuristics: they look for the common shapes of each
//! style and will miss unusual author names or citation forms.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::CITATION_FORMAT;
use super::references::reference_section;
use crate::scan::scan;
use crate::{LintResult, RuleOptions};

static AUTHOR_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\(\p{Lu}[\p{L}'’\-]+(?:\s+(?:et\s+al\.?|&|and)(?:\s+\p{Lu}[\p{L}'’\-]+)?)*,\s*\d{4}[a-z]?\)",
    )
    .expect("Invalid regex pattern for author-year citations")
});

static BRACKET_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\d+(?:\s*[,\-–]\s*\d+)*\]").expect("Invalid regex pattern for numbered citations")
});

/// Returns true if the line contains a `[n]` citation that is not a link,
/// a reference definition or a reference-style link label.
fn has_bracket_citation(text: &str) -> bool {
    BRACKET_NUMBER.find_iter(text).any(|m| {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        !matches!(before, Some(']' | '!')) && !matches!(after, Some('(' | ':' | '['))
    })
}

pub(super) fn lint_citations(content: &str, options: &RuleOptions) -> Vec<LintResult> {
    let lines = scan(content);
    let skipped: HashSet<usize> = reference_section(&lines)
        .map(|range| lines[range].iter().map(|line| line.number).collect())
        .unwrap_or_default();
    let style = options.citation_style;

    lines
        .iter()
        .filter(|line| !line.is_code() && !skipped.contains(&line.number))
        .filter_map(|line| {
            if style.is_numeric() {
                AUTHOR_YEAR.is_match(line.text).then(|| {
                    LintResult::new(
                        CITATION_FORMAT,
                        "academic.citation.authorYear",
                        format!(
                            "Use numbered citations like [1] instead of (Author, Year) for {}",
                            style.as_str().to_uppercase()
                        ),
                        line.number,
                    )
                })
            } else {
                has_bracket_citation(line.text).then(|| {
                    LintResult::new(
                        CITATION_FORMAT,
                        "academic.citation.bracket",
                        "Use author-year citations like (Author, Year) instead of [n] for APA",
                        line.number,
                    )
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CitationStyle;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn lint_with(content: &str, style: CitationStyle) -> Vec<LintResult> {
        lint_citations(content, &RuleOptions::default().with_citation_style(style))
    }

    #[test]
    fn apa_flags_bracket_citation() {
        let results = lint_with("See [1] for details.", CitationStyle::Apa);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].line, 1);
        assert_eq!(results[0].message_key, "academic.citation.bracket");
    }

    #[rstest]
    #[case("As shown in [1, 2].", true)]
    #[case("See [3-5] and [7].", true)]
    #[case("A [link](http://x) here.", false)]
    #[case("[1]: http://example.com", false)]
    #[case("A footnote[^1].", false)]
    #[case("![1](image.png)", false)]
    #[case("Reference link [text][1].", false)]
    fn detects_bracket_citations(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(has_bracket_citation(text), expected);
    }

    #[rstest]
    #[case("As noted (Smith, 2020).", true)]
    #[case("Prior work (Smith et al., 2019a) shows", true)]
    #[case("Both (Smith & Jones, 2021) agree", true)]
    #[case("Costs (in 2020) rose", false)]
    #[case("See [1].", false)]
    fn ieee_flags_author_year(#[case] text: &str, #[case] flagged: bool) {
        assert_eq!(!lint_with(text, CitationStyle::Ieee).is_empty(), flagged);
    }

    #[test]
    fn skips_code_and_reference_section() {
        let content = "```\nSee [1].\n```\n# References\n[1] Smith (2020)\n";
        assert!(lint_with(content, CitationStyle::Apa).is_empty());
    }
}
