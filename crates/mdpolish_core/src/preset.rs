//! Built-in presets.
//!
//! Selecting a preset replaces both the enabled rule set and the rule options.

use std::sync::LazyLock;

use serde::Serialize;

use crate::rules::{academic, blockquote, code_block, heading, list, whitespace, writing};
use crate::{CitationStyle, RuleOptions};

/// A named, immutable rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Lowercase preset name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Rule ids enabled by the preset, in registry order.
    pub enabled_rules: Vec<&'static str>,
    /// Options applied by the preset.
    pub options: RuleOptions,
}

impl Preset {
    /// Resolves the preset into rule options with an explicit rule set.
    pub fn to_options(&self) -> RuleOptions {
        self.options
            .clone()
            .with_enabled_rules(self.enabled_rules.iter().copied())
    }
}

const FORMATTING: [&str; 11] = [
    whitespace::TRAILING_SPACES,
    whitespace::CONSECUTIVE_BLANKS,
    whitespace::FINAL_NEWLINE,
    heading::HEADING_SPACE,
    heading::HEADING_BLANK_LINES,
    list::LIST_MARKER,
    list::LIST_INDENT,
    blockquote::BLOCKQUOTE_SPACE,
    blockquote::BLOCKQUOTE_NESTED,
    code_block::CODE_FENCE_STYLE,
    code_block::CODE_BLOCK_PADDING,
];

const WRITING: [&str; 2] = [writing::HEADING_DEPTH, writing::LONG_PARAGRAPH];

const ACADEMIC: [&str; 10] = [
    academic::HEADING_NUMBERING,
    academic::FIGURE_CAPTION_FORMAT,
    academic::TABLE_CAPTION_FORMAT,
    academic::CITATION_FORMAT,
    academic::REFERENCE_LIST_FORMAT,
    academic::FIGURE_REFERENCE,
    academic::SECTION_DEPTH,
    academic::PARAGRAPH_LENGTH,
    academic::ABSTRACT_FORMAT,
    academic::KEYWORDS_FORMAT,
];

fn journal(
    name: &'static str,
    description: &'static str,
    style: CitationStyle,
    figure_format: &str,
    table_format: &str,
    max_heading_depth: usize,
) -> Preset {
    Preset {
        name,
        description,
        enabled_rules: FORMATTING.iter().chain(&ACADEMIC).copied().collect(),
        options: RuleOptions::default()
            .with_citation_style(style)
            .with_figure_format(figure_format)
            .with_table_format(table_format)
            .with_max_heading_depth(max_heading_depth),
    }
}

static PRESETS: LazyLock<Vec<Preset>> = LazyLock::new(|| {
    vec![
        Preset {
            name: "standard",
            description: "Formatting fixes plus general writing checks",
            enabled_rules: FORMATTING.iter().chain(&WRITING).copied().collect(),
            options: RuleOptions::default(),
        },
        Preset {
            name: "minimal",
            description: "Whitespace and heading spacing only",
            enabled_rules: vec![
                whitespace::TRAILING_SPACES,
                whitespace::CONSECUTIVE_BLANKS,
                whitespace::FINAL_NEWLINE,
                heading::HEADING_SPACE,
            ],
            options: RuleOptions::default(),
        },
        Preset {
            name: "strict",
            description: "Every rule with tighter depth and length limits",
            enabled_rules: FORMATTING
                .iter()
                .chain(&WRITING)
                .chain(&ACADEMIC)
                .copied()
                .collect(),
            options: RuleOptions::default()
                .with_max_heading_depth(3)
                .with_max_paragraph_chars(600),
        },
        journal(
            "ieee",
            "IEEE style: numbered citations, 'Fig. 1.' captions",
            CitationStyle::Ieee,
            "Fig. 1.",
            "Table 1.",
            3,
        ),
        journal(
            "acm",
            "ACM style: numbered citations, 'Figure 1.' captions",
            CitationStyle::Acm,
            "Figure 1.",
            "Table 1.",
            3,
        ),
        journal(
            "apa",
            "APA style: author-year citations, 'Figure 1' captions",
            CitationStyle::Apa,
            "Figure 1",
            "Table 1",
            5,
        ),
    ]
});

/// All built-in presets.
pub fn presets() -> &'static [Preset] {
    &PRESETS
}

/// Finds a preset by name, ignoring case.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleRegistry;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_all_presets() {
        let names: Vec<&str> = presets().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["standard", "minimal", "strict", "ieee", "acm", "apa"]);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_preset("IEEE").map(|p| p.name), Some("ieee"));
        assert_eq!(find_preset(" Apa ").map(|p| p.name), Some("apa"));
        assert!(find_preset("mla").is_none());
    }

    #[test]
    fn preset_rule_ids_are_registered() {
        let registry = RuleRegistry::with_builtin_rules();
        for preset in presets() {
            for id in &preset.enabled_rules {
                assert!(registry.contains(id), "{} names unknown rule {}", preset.name, id);
            }
        }
    }

    #[test]
    fn standard_matches_registry_defaults() {
        let registry = RuleRegistry::with_builtin_rules();
        let standard = find_preset("standard").unwrap().to_options();
        assert_eq!(standard.enabled_rules, Some(registry.default_enabled_ids()));
    }

    #[test]
    fn journal_presets_configure_citation_style() {
        let apa = find_preset("apa").unwrap().to_options();
        assert_eq!(apa.citation_style, CitationStyle::Apa);
        assert!(
            apa.enabled_rules
                .as_ref()
                .is_some_and(|ids| ids.contains(academic::CITATION_FORMAT))
        );
        let ieee = find_preset("ieee").unwrap().to_options();
        assert_eq!(ieee.figure_format, "Fig. 1.");
    }
}
