//! Diff-aware lint context.
//!
//! Rules always run against the whole document; the context only decides
//! which of their results are reported.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use similar::{DiffOp, TextDiff};

use crate::LintResult;
use crate::scan::count_lines;

/// Restricts lint output to a set of changed lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintContext {
    /// 1-based line numbers. `None` or empty means the whole document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    changed_lines: Option<BTreeSet<usize>>,
}

impl LintContext {
    /// A context that admits every result.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context restricted to the given 1-based line numbers.
    pub fn from_changed_lines(lines: impl IntoIterator<Item = usize>) -> Self {
        Self {
            changed_lines: Some(lines.into_iter().collect()),
        }
    }

    /// Derives the changed lines of `current` relative to `previous`.
    ///
    /// Inserted and replaced lines are marked. A pure deletion marks the line
    /// now occupying its position, clamped to the last line of `current`.
    pub fn between(previous: &str, current: &str) -> Self {
        let diff = TextDiff::from_lines(previous, current);
        let last_line = count_lines(current);
        let mut changed = BTreeSet::new();

        for op in diff.ops() {
            match *op {
                DiffOp::Equal { .. } => {}
                DiffOp::Delete { new_index, .. } => {
                    if last_line > 0 {
                        changed.insert((new_index + 1).min(last_line));
                    }
                }
                DiffOp::Insert {
                    new_index, new_len, ..
                }
                | DiffOp::Replace {
                    new_index, new_len, ..
                } => {
                    changed.extend(new_index + 1..=new_index + new_len);
                }
            }
        }

        Self::from_changed_lines(changed)
    }

    /// Returns true when no line restriction applies.
    pub fn is_whole_document(&self) -> bool {
        self.changed_lines
            .as_ref()
            .is_none_or(|lines| lines.is_empty())
    }

    /// The restricting line set, if any.
    pub fn changed_lines(&self) -> Option<&BTreeSet<usize>> {
        self.changed_lines.as_ref().filter(|lines| !lines.is_empty())
    }

    /// Returns true if the result touches at least one changed line.
    pub fn admits(&self, result: &LintResult) -> bool {
        match self.changed_lines() {
            None => true,
            Some(lines) => result.line_refs().any(|line| lines.contains(&line)),
        }
    }

    /// Keeps only the admitted results, preserving order.
    pub fn filter(&self, results: Vec<LintResult>) -> Vec<LintResult> {
        if self.is_whole_document() {
            return results;
        }
        results
            .into_iter()
            .filter(|result| self.admits(result))
            .collect()
    }
}
