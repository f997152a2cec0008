//! Section numbering (`# 1 Intro`, `## 1.1 Scope`).
//!
//! Depth is relative to the first numbered heading, so an un-numbered
//! document title above the numbered sections is allowed. Numbered headings
//! shallower than that base level are skipped without any check, and
//! conventionally unnumbered sections (abstract, references, appendices)
//! are never reported as missing a number.

use std::sync::LazyLock;

use regex::Regex;

use super::HEADING_NUMBERING;
use crate::scan::scan;
use crate::{LintResult, RuleOptions};

static SECTION_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)\.?(?:\s+|$)").expect("Invalid regex pattern for section numbers")
});

/// Back-matter and front-matter headings that are conventionally unnumbered.
static UNNUMBERED_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:abstract|keywords|index terms|references|bibliography|works cited|acknowledg(?:e)?ments?|appendix\b.*|参考文献|致谢|附录.*)\s*:?$",
    )
    .expect("Invalid regex pattern for unnumbered headings")
});

const MAX_DEPTH: usize = 6;

/// Parses the leading section number of a heading text.
pub(crate) fn parse_section_number(text: &str) -> Option<Vec<u32>> {
    let caps = SECTION_NUMBER.captures(text)?;
    caps[1]
        .split('.')
        .map(|group| group.parse().ok())
        .collect()
}

/// Returns the heading text with any leading section number removed.
pub(crate) fn strip_section_number(text: &str) -> &str {
    match SECTION_NUMBER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

fn render<T: ToString>(numbers: &[T]) -> String {
    numbers
        .iter()
        .map(T::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[derive(Debug, PartialEq, Eq)]
enum Violation {
    Depth { depth: usize },
    Hierarchy,
    Prefix { parent: Vec<u32> },
    /// Widened so the successor of `u32::MAX` is representable.
    Sequence { expected: Vec<u64> },
}

impl Violation {
    fn key(&self) -> &'static str {
        match self {
            Self::Depth { .. } => "academic.headingNumbering.depth",
            Self::Hierarchy => "academic.headingNumbering.hierarchy",
            Self::Prefix { .. } => "academic.headingNumbering.prefix",
            Self::Sequence { .. } => "academic.headingNumbering.sequence",
        }
    }

    fn message(&self, found: &[u32]) -> String {
        let found = render(found);
        match self {
            Self::Depth { depth } => {
                format!("Section number {found} has more levels than heading depth {depth}")
            }
            Self::Hierarchy => format!("Section {found} skips a parent level"),
            Self::Prefix { parent } => format!(
                "Section {found} does not belong to parent section {}",
                render(parent)
            ),
            Self::Sequence { expected } => {
                format!("Expected section number {}, found {found}", render(expected))
            }
        }
    }
}

/// Last observed number per relative depth.
#[derive(Debug, Default)]
struct Counters([Option<u32>; MAX_DEPTH]);

impl Counters {
    fn check(&self, depth: usize, numbers: &[u32]) -> Option<Violation> {
        if numbers.len() > depth {
            return Some(Violation::Depth { depth });
        }

        let ancestors: Option<Vec<u32>> = self.0[..depth - 1].iter().copied().collect();
        let Some(ancestors) = ancestors else {
            return Some(Violation::Hierarchy);
        };

        if numbers.len() == depth && numbers[..depth - 1] != ancestors[..] {
            return Some(Violation::Prefix { parent: ancestors });
        }

        let mut expected: Vec<u64> = ancestors.into_iter().map(u64::from).collect();
        expected.push(self.0[depth - 1].map_or(1, |last| u64::from(last) + 1));
        let found = numbers.iter().copied().map(u64::from);
        (!found.eq(expected.iter().copied())).then_some(Violation::Sequence { expected })
    }

    /// Adopts the observed numbers and clears deeper levels.
    fn resync(&mut self, depth: usize, numbers: &[u32]) {
        if let Some(last) = numbers.last() {
            self.0[depth - 1] = Some(*last);
        }
        if numbers.len() == depth {
            for (slot, number) in self.0.iter_mut().zip(&numbers[..depth - 1]) {
                *slot = Some(*number);
            }
        }
        for slot in &mut self.0[depth..] {
            *slot = None;
        }
    }
}

/// Reports numbers out of sequence, numbers of the wrong depth, and
/// unnumbered headings at or below the base level.
pub(super) fn lint_heading_numbering(content: &str, _options: &RuleOptions) -> Vec<LintResult> {
    let mut results = Vec::new();
    let mut counters = Counters::default();
    let mut base_level: Option<usize> = None;

    for line in scan(content) {
        let Some(heading) = line.heading() else {
            continue;
        };

        let Some(numbers) = parse_section_number(heading.text) else {
            if base_level.is_some_and(|base| heading.level >= base)
                && !UNNUMBERED_TITLE.is_match(heading.text)
            {
                results.push(LintResult::new(
                    HEADING_NUMBERING,
                    "academic.headingNumbering.missing",
                    "Heading is not numbered",
                    line.number,
                ));
            }
            continue;
        };

        let base = *base_level.get_or_insert(heading.level);
        if heading.level < base {
            continue;
        }
        let depth = heading.level - base + 1;

        if let Some(violation) = counters.check(depth, &numbers) {
            results.push(LintResult::new(
                HEADING_NUMBERING,
                violation.key(),
                violation.message(&numbers),
                line.number,
            ));
        }
        counters.resync(depth, &numbers);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn keys(content: &str) -> Vec<(usize, String)> {
        lint_heading_numbering(content, &RuleOptions::default())
            .into_iter()
            .map(|r| (r.line, r.message_key))
            .collect()
    }

    #[test]
    fn parses_section_numbers() {
        assert_eq!(parse_section_number("1 Intro"), Some(vec![1]));
        assert_eq!(parse_section_number("2.3. Scope"), Some(vec![2, 3]));
        assert_eq!(parse_section_number("4"), Some(vec![4]));
        assert_eq!(parse_section_number("2024年"), None);
        assert_eq!(parse_section_number("Intro"), None);
        assert_eq!(strip_section_number("3.1 References"), "References");
    }

    #[test]
    fn well_numbered_document_is_clean() {
        let content = "# 1 Intro\n## 1.1 Scope\n## 1.2 Terms\n### 1.2.1 Detail\n# 2 Method\n## 2.1 Data\n";
        assert!(keys(content).is_empty());
    }

    #[test]
    fn skipped_sibling_is_a_sequence_error() {
        let results = lint_heading_numbering("# 1 Intro\n## 3 Background\n", &RuleOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].line, 2);
        assert_eq!(results[0].message_key, "academic.headingNumbering.sequence");
        assert_eq!(results[0].message, "Expected section number 1.1, found 3");
    }

    #[rstest]
    #[case("# 1 A\n# 3 B\n", vec![(2, "academic.headingNumbering.sequence")])]
    #[case("# 1 A\n## 1.1.1 B\n", vec![(2, "academic.headingNumbering.depth")])]
    #[case("# 1 A\n### 1.1.1 B\n", vec![(2, "academic.headingNumbering.hierarchy")])]
    #[case("# 1 A\n## 2.1 B\n", vec![(2, "academic.headingNumbering.prefix")])]
    #[case("# 1 A\n## Untitled\n", vec![(2, "academic.headingNumbering.missing")])]
    fn reports_first_violation(#[case] content: &str, #[case] expected: Vec<(usize, &str)>) {
        let expected: Vec<(usize, String)> = expected
            .into_iter()
            .map(|(line, key)| (line, key.to_string()))
            .collect();
        assert_eq!(keys(content), expected);
    }

    #[test]
    fn resyncs_to_observed_numbers() {
        // After the jump to 3, numbering continues from 3 without cascading.
        let content = "# 1 A\n# 3 B\n# 4 C\n## 4.1 D\n";
        assert_eq!(
            keys(content),
            vec![(2, "academic.headingNumbering.sequence".to_string())]
        );
    }

    #[test]
    fn unnumbered_title_above_sections_is_allowed() {
        let content = "# Paper Title\n## 1 Intro\n### 1.1 Scope\n## 2 Method\n";
        assert!(keys(content).is_empty());
    }

    #[test]
    fn largest_section_number_does_not_overflow() {
        let results =
            lint_heading_numbering("# 4294967295 A\n# 1 B\n", &RuleOptions::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].line, 1);
        assert_eq!(results[1].line, 2);
        assert_eq!(results[1].message_key, "academic.headingNumbering.sequence");
        assert_eq!(results[1].message, "Expected section number 4294967296, found 1");
        assert_eq!(
            keys("# 1 A\n## 1.4294967295 B\n## 1.4294967295 C\n").len(),
            2
        );
    }

    #[test]
    fn back_matter_may_stay_unnumbered() {
        let content = "# 1 Intro\n# 2 Method\n# Acknowledgments\n# References\n# Appendix A: Proofs\n";
        assert!(keys(content).is_empty());
    }

    #[test]
    fn numbered_headings_above_the_base_level_are_skipped() {
        assert!(keys("## 1 A\n## 2 B\n# 7 Part\n## 3 C\n").is_empty());
    }

    #[test]
    fn headings_before_numbering_are_not_missing() {
        assert!(keys("# Preface\n# 1 Intro\n").is_empty());
        assert!(keys("```\n# 1 A\n# 5 B\n```\n").is_empty());
    }
}
