//! Format engine: runs fix rules, then lint rules, over one document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::registry::initialize_rules;
use crate::scan::normalize_line_endings;
use crate::{FormatResult, LintContext, LintResult, RuleOptions, RuleRegistry, find_preset};

/// Options for one engine invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatEngineOptions {
    /// Rule options used when no known preset is selected.
    pub rules: RuleOptions,

    /// Preset name. A known preset replaces `rules` entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Restricts reported lint results to changed lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<LintContext>,
}

impl FormatEngineOptions {
    /// Creates options with registry defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule options.
    pub fn with_rules(mut self, rules: RuleOptions) -> Self {
        self.rules = rules;
        self
    }

    /// Selects a preset by name.
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    /// Sets the diff-aware lint context.
    pub fn with_context(mut self, context: LintContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Returns the effective rule options after preset resolution.
    ///
    /// An unknown preset is logged and ignored.
    pub fn resolve_rules(&self) -> RuleOptions {
        match self.preset.as_deref() {
            None => self.rules.clone(),
            Some(name) => match find_preset(name) {
                Some(preset) => preset.to_options(),
                None => {
                    warn!("Unknown preset '{}', using explicit options", name);
                    self.rules.clone()
                }
            },
        }
    }
}

/// Runs rules from a registry.
#[derive(Debug, Clone, Copy)]
pub struct FormatEngine<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> FormatEngine<'a> {
    /// Creates an engine over `registry`.
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// Formats `content`, then lints the formatted result.
    pub fn format(&self, content: &str, options: &FormatEngineOptions) -> FormatResult {
        let rules = options.resolve_rules();
        let (formatted, applied_rules) = self.apply_fixes(content, &rules);
        let lint_results = self.lint(&formatted, &rules, options.context.as_ref());

        FormatResult {
            has_changes: formatted != content,
            formatted,
            applied_rules,
            lint_results,
        }
    }

    /// Applies every enabled fix in registry order.
    ///
    /// Returns the fixed content and the ids of rules that changed it.
    pub fn apply_fixes(&self, content: &str, options: &RuleOptions) -> (String, Vec<String>) {
        let mut current = normalize_line_endings(content).into_owned();
        let mut applied = Vec::new();

        for rule in self.registry.enabled_rules(options) {
            let Some(fixed) = rule.fix(&current, options) else {
                continue;
            };
            if fixed != current {
                debug!("Applied rule '{}'", rule.id);
                applied.push(rule.id.to_string());
                current = fixed;
            }
        }

        (current, applied)
    }

    /// Lints `content` with every enabled lint-capable rule.
    ///
    /// Result ids are assigned before `context` filtering, so the filtered
    /// output is always a subset of the unfiltered one.
    pub fn lint(
        &self,
        content: &str,
        options: &RuleOptions,
        context: Option<&LintContext>,
    ) -> Vec<LintResult> {
        let mut results = Vec::new();
        let mut counters: HashMap<&str, usize> = HashMap::new();

        for rule in self.registry.enabled_rules(options) {
            let Some(found) = rule.lint(content, options) else {
                continue;
            };
            for mut result in found {
                let n = counters.entry(rule.id).or_default();
                *n += 1;
                result.id = format!("{}-{}", rule.id, n);
                results.push(result);
            }
        }
        results.sort_by_key(|result| result.line);

        let total = results.len();
        let results = match context {
            Some(context) => context.filter(results),
            None => results,
        };
        debug!("{} lint results ({} after diff filtering)", total, results.len());
        results
    }
}

/// Formats `content` with the global registry.
pub fn format(content: &str, options: &FormatEngineOptions) -> FormatResult {
    FormatEngine::new(initialize_rules()).format(content, options)
}

/// Lints `content` with the global registry.
pub fn lint(content: &str, options: &RuleOptions, context: Option<&LintContext>) -> Vec<LintResult> {
    FormatEngine::new(initialize_rules()).lint(content, options, context)
}
