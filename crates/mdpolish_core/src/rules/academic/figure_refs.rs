use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::FIGURE_REFERENCE;
use super::captions::{CaptionKind, find_captions};
use crate::scan::scan;
use crate::{LintResult, RuleOptions};

static FIGURE_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:figure|fig\.?)\s*(\d+)\b")
        .expect("Invalid regex pattern for figure mentions")
});

pub(super) fn lint_figure_references(content: &str, options: &RuleOptions) -> Vec<LintResult> {
    let captions = find_captions(content, CaptionKind::Figure, options);
    let caption_lines: HashSet<usize> = captions.iter().map(|(line, _)| *line).collect();
    let mut first_caption: HashMap<u32, usize> = HashMap::new();
    for (line, caption) in &captions {
        first_caption.entry(caption.number).or_insert(*line);
    }

    let mut results = Vec::new();
    for line in scan(content) {
        if line.is_code() || caption_lines.contains(&line.number) {
            continue;
        }
        for caps in FIGURE_MENTION.captures_iter(line.text) {
            let Ok(number) = caps[1].parse::<u32>() else {
                continue;
            };
            match first_caption.get(&number) {
                None => results.push(LintResult::new(
                    FIGURE_REFERENCE,
                    "academic.figureReference.missing",
                    format!("Figure {number} is referenced but has no caption"),
                    line.number,
                )),
                Some(caption_line) if *caption_line > line.number => {
                    results.push(LintResult::new(
                        FIGURE_REFERENCE,
                        "academic.figureReference.forward",
                        format!(
                            "Figure {number} is referenced before its caption on line {caption_line}"
                        ),
                        line.number,
                    ))
                }
                Some(_) => {}
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys(content: &str) -> Vec<(usize, String)> {
        lint_figure_references(content, &RuleOptions::default())
            .into_iter()
            .map(|r| (r.line, r.message_key))
            .collect()
    }

    #[test]
    fn mention_after_caption_is_clean() {
        assert!(keys("Figure 1: Setup\n\nAs Fig. 1 shows, it works.\n").is_empty());
    }

    #[test]
    fn reports_missing_and_forward_mentions() {
        let content = "See Figure 2 and figure 3.\n\nFigure 1: A\nFigure 2: B\n";
        assert_eq!(
            keys(content),
            vec![
                (1, "academic.figureReference.forward".to_string()),
                (1, "academic.figureReference.missing".to_string()),
            ]
        );
    }

    #[test]
    fn ignores_code_and_unrelated_words() {
        assert!(keys("```\nFigure 9\n```\nconfigure 3 items\n").is_empty());
    }
}
