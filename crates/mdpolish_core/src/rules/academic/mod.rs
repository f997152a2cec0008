//! Academic writing rules.
//!
//! All rules in this family are lint-only and opt-in. They are enabled by the
//! `strict`, `ieee`, `acm` and `apa` presets.

mod captions;
mod citations;
mod figure_refs;
mod front_matter;
mod numbering;
mod references;

use super::writing::{find_deep_headings, find_long_paragraphs};
use crate::rule::{FormatRule, RuleCategory, RuleKind};
use crate::{LintResult, RuleOptions};

pub const HEADING_NUMBERING: &str = "heading-numbering";
pub const FIGURE_CAPTION_FORMAT: &str = "figure-caption-format";
pub const TABLE_CAPTION_FORMAT: &str = "table-caption-format";
pub const CITATION_FORMAT: &str = "citation-format";
pub const REFERENCE_LIST_FORMAT: &str = "reference-list-format";
pub const FIGURE_REFERENCE: &str = "figure-reference";
pub const SECTION_DEPTH: &str = "section-depth";
pub const PARAGRAPH_LENGTH: &str = "paragraph-length";
pub const ABSTRACT_FORMAT: &str = "abstract-format";
pub const KEYWORDS_FORMAT: &str = "keywords-format";

fn academic(id: &'static str, lint: crate::rule::LintFn) -> FormatRule {
    FormatRule::new(id, RuleCategory::Academic, RuleKind::LintOnly(lint)).disabled_by_default()
}

pub(crate) fn rules() -> Vec<FormatRule> {
    vec![
        academic(HEADING_NUMBERING, numbering::lint_heading_numbering)
            .named("Heading numbering")
            .describe("Section numbers follow a gap-free hierarchical sequence"),
        academic(FIGURE_CAPTION_FORMAT, captions::lint_figure_captions)
            .named("Figure caption format")
            .describe("Figure captions use the configured label, punctuation and sequence"),
        academic(TABLE_CAPTION_FORMAT, captions::lint_table_captions)
            .named("Table caption format")
            .describe("Table captions use the configured label, punctuation and sequence"),
        academic(CITATION_FORMAT, citations::lint_citations)
            .named("Citation format")
            .describe("In-text citations match the configured citation style"),
        academic(REFERENCE_LIST_FORMAT, references::lint_reference_list)
            .named("Reference list format")
            .describe("Reference entries match the configured citation style"),
        academic(FIGURE_REFERENCE, figure_refs::lint_figure_references)
            .named("Figure references")
            .describe("Every referenced figure has a caption that precedes the reference"),
        academic(SECTION_DEPTH, lint_section_depth)
            .named("Section depth")
            .describe("Sections are not nested deeper than the configured maximum"),
        academic(PARAGRAPH_LENGTH, lint_paragraph_length)
            .named("Paragraph length")
            .describe("Paragraphs stay within the configured character budget"),
        academic(ABSTRACT_FORMAT, front_matter::lint_abstract)
            .named("Abstract")
            .describe("The document has a non-empty abstract"),
        academic(KEYWORDS_FORMAT, front_matter::lint_keywords)
            .named("Keywords")
            .describe("The document lists between one and twelve keywords"),
    ]
}

fn lint_section_depth(content: &str, options: &RuleOptions) -> Vec<LintResult> {
    find_deep_headings(
        content,
        options.max_heading_depth,
        SECTION_DEPTH,
        "academic.sectionDepth.tooDeep",
    )
}

fn lint_paragraph_length(content: &str, options: &RuleOptions) -> Vec<LintResult> {
    find_long_paragraphs(
        content,
        options.max_paragraph_chars,
        PARAGRAPH_LENGTH,
        "academic.paragraphLength.tooLong",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegating_rules_use_academic_identity() {
        let options = RuleOptions::default()
            .with_max_heading_depth(1)
            .with_max_paragraph_chars(3);
        let depth = lint_section_depth("# A\n## B\n", &options);
        assert_eq!(depth.len(), 1);
        assert_eq!(depth[0].rule_id, SECTION_DEPTH);
        assert_eq!(depth[0].message_key, "academic.sectionDepth.tooDeep");

        let length = lint_paragraph_length("long text\n", &options);
        assert_eq!(length.len(), 1);
        assert_eq!(length[0].rule_id, PARAGRAPH_LENGTH);
        assert_eq!(length[0].message_key, "academic.paragraphLength.tooLong");
    }

    #[test]
    fn every_rule_is_lint_only_and_opt_in() {
        let rules = rules();
        assert_eq!(rules.len(), 10);
        assert!(rules.iter().all(|r| !r.enabled_by_default && !r.is_fixable() && r.has_lint()));
    }
}
