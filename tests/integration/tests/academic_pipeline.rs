//! End-to-end tests over whole documents
//!
//! Runs the format engine with presets, diff-aware contexts, snapshots and
//! exporters the way a host application would.

use mdpolish_core::{
    FormatEngineOptions, FormatResult, HistoryItem, LintContext, LintResult, Snapshot,
    SnapshotManager, count_lines, export_to_json, export_to_markdown, export_to_sarif_with_uri,
    find_preset, format, initialize_rules, lint,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const IEEE_PAPER: &str = include_str!("fixtures/ieee_paper.md");
const MESSY_NOTES: &str = include_str!("fixtures/messy_notes.md");

fn format_with(content: &str, preset: &str) -> FormatResult {
    format(content, &FormatEngineOptions::new().with_preset(preset))
}

fn rule_ids(results: &[LintResult]) -> Vec<&str> {
    let mut ids: Vec<&str> = results.iter().map(|r| r.rule_id.as_str()).collect();
    ids.sort();
    ids.dedup();
    ids
}

mod presets {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ieee_paper_is_clean_under_ieee() {
        let result = format_with(IEEE_PAPER, "ieee");
        assert!(!result.has_changes, "applied: {:?}", result.applied_rules);
        assert_eq!(result.lint_results, Vec::<LintResult>::new());
    }

    #[test]
    fn ieee_paper_breaks_apa_conventions() {
        let result = format_with(IEEE_PAPER, "apa");
        let ids = rule_ids(&result.lint_results);
        assert!(ids.contains(&"citation-format"));
        assert!(ids.contains(&"reference-list-format"));
        assert!(ids.contains(&"figure-caption-format"));

        let citation_lines: Vec<usize> = result
            .lint_results
            .iter()
            .filter(|r| r.rule_id == "citation-format")
            .map(|r| r.line)
            .collect();
        assert_eq!(citation_lines, vec![11]);
    }

    #[test]
    fn minimal_preset_ignores_academic_rules() {
        let result = format_with("See (Smith, 2020).\n", "minimal");
        assert!(result.lint_results.is_empty());
    }

    #[rstest]
    fn every_preset_is_idempotent(
        #[values("standard", "minimal", "strict", "ieee", "acm", "apa")] preset: &str,
        #[values(IEEE_PAPER, MESSY_NOTES)] content: &str,
    ) {
        let once = format_with(content, preset);
        let twice = format_with(&once.formatted, preset);
        assert_eq!(twice.formatted, once.formatted);
        assert!(!twice.has_changes);

        let lines = count_lines(&once.formatted);
        for result in &once.lint_results {
            assert!(result.line_refs().all(|line| (1..=lines).contains(&line)));
        }
    }
}

mod formatting {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messy_notes_are_normalized() {
        let result = format_with(MESSY_NOTES, "standard");
        assert!(result.has_changes);
        assert!(result.formatted.starts_with("# Notes\n\n## Todo\n\n"));
        assert!(result.formatted.contains("\n# not a heading\n"));
        assert!(!result.formatted.contains("~~~"));
        assert!(result.formatted.ends_with("Closing line\n"));
        assert!(
            result
                .applied_rules
                .iter()
                .any(|id| id == "trailing-spaces")
        );
    }

    #[test]
    fn crlf_input_is_normalized() {
        let result = format_with("# Title\r\n\r\nText\r\n", "standard");
        assert_eq!(result.formatted, "# Title\n\nText\n");
    }
}

mod diff_aware {
    use super::*;
    use pretty_assertions::assert_eq;

    fn replace_line(content: &str, number: usize, text: &str) -> String {
        content
            .lines()
            .enumerate()
            .map(|(idx, line)| if idx + 1 == number { text } else { line })
            .map(|line| format!("{line}\n"))
            .collect()
    }

    #[test]
    fn only_edited_lines_are_reported() {
        let options = find_preset("ieee").unwrap().to_options();
        let before = replace_line(IEEE_PAPER, 11, "Prior work (Smith, 2020) examined checkers.");
        let after = replace_line(&before, 15, "As shown in Fig. 2, the pipeline has two stages.");

        let all = lint(&after, &options, None);
        let lines: Vec<usize> = all.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![11, 15]);

        let context = LintContext::between(&before, &after);
        assert_eq!(
            context.changed_lines().map(|set| set.iter().copied().collect::<Vec<_>>()),
            Some(vec![15])
        );
        let filtered = lint(&after, &options, Some(&context));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].rule_id, "figure-reference");
        assert_eq!(filtered[0].message_key, "academic.figureReference.missing");
        assert!(all.contains(&filtered[0]));
    }

    #[test]
    fn identical_documents_report_everything() {
        let options = find_preset("ieee").unwrap().to_options();
        let content = replace_line(IEEE_PAPER, 11, "Prior work (Smith, 2020) examined checkers.");
        let context = LintContext::between(&content, &content);
        assert!(context.is_whole_document());
        assert_eq!(
            lint(&content, &options, Some(&context)),
            lint(&content, &options, None)
        );
    }
}

mod history {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn undo_and_redo_walk_formatting_history() {
        let registry = initialize_rules();
        let options = find_preset("standard").unwrap().to_options();
        let mut history = SnapshotManager::default();

        history.push(Snapshot::capture(MESSY_NOTES, registry, &options, Some("standard")));
        let result = format_with(MESSY_NOTES, "standard");
        history.push(Snapshot::capture(
            result.formatted.clone(),
            registry,
            &options,
            Some("standard"),
        ));
        assert_eq!(history.len(), 2);

        assert_eq!(history.undo().map(|s| s.content.as_str()), Some(MESSY_NOTES));
        assert!(history.can_redo());
        assert_eq!(
            history.redo().map(|s| s.content.as_str()),
            Some(result.formatted.as_str())
        );

        let enabled = history
            .current()
            .map(|s| s.rule_states.iter().filter(|r| r.enabled).count());
        assert_eq!(enabled, options.enabled_rules.as_ref().map(|ids| ids.len()));
    }

    #[test]
    fn history_item_fingerprint_is_stable() {
        let result = format_with(MESSY_NOTES, "standard");
        let a = HistoryItem::from_result(MESSY_NOTES, &result, Some("standard"));
        let b = HistoryItem::from_result(MESSY_NOTES, &result, Some("standard"));
        assert_eq!(a.id, b.id);
        assert_eq!(a.id.len(), 16);
        assert_eq!(a.applied_rules, result.applied_rules);
    }
}

mod exports {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reports_agree_on_issue_count() {
        let result = format_with(IEEE_PAPER, "apa");
        let issues = result.issue_count();
        assert!(issues > 0);

        let json: serde_json::Value =
            serde_json::from_str(&export_to_json(&result).unwrap()).unwrap();
        assert_eq!(json["lintResults"].as_array().unwrap().len(), issues);

        let sarif = export_to_sarif_with_uri("paper.md", &result);
        assert_eq!(sarif.runs[0].results.len(), issues);
        assert_eq!(
            sarif.runs[0].tool.driver.rules.len(),
            rule_ids(&result.lint_results).len()
        );

        let report = export_to_markdown(&result);
        assert!(report.contains(&format!("- Issues: {issues} (")));
        for id in rule_ids(&result.lint_results) {
            assert!(report.contains(&format!("### `{id}`")));
        }
    }
}
