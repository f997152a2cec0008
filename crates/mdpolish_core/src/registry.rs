//! Rule registry.
//!
//! Rules are kept ordered by category, then by registration order within a
//! category. That order is the order fix rules are applied in.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::OnceLock;

use serde::Serialize;
use tracing::{debug, warn};

use crate::rule::{FormatRule, RuleCategory};
use crate::{FormatterError, RuleOptions, rules};

static GLOBAL_REGISTRY: OnceLock<RuleRegistry> = OnceLock::new();

/// Populates the process-wide registry with the built-in rules.
///
/// The first call builds the registry; later calls return the same instance.
pub fn initialize_rules() -> &'static RuleRegistry {
    GLOBAL_REGISTRY.get_or_init(|| {
        let registry = RuleRegistry::with_builtin_rules();
        debug!("Initialized rule registry with {} rules", registry.len());
        registry
    })
}

/// Ordered collection of rules with unique ids.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<FormatRule>,
    index: HashMap<&'static str, usize>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in rule.
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        if let Err(e) = registry.register_rules(rules::builtin_rules()) {
            warn!("Failed to register built-in rules: {}", e);
        }
        registry
    }

    /// Registers a rule.
    ///
    /// Fails with [`FormatterError::DuplicateRuleId`] if the id is taken.
    pub fn register(&mut self, rule: FormatRule) -> Result<(), FormatterError> {
        if self.index.contains_key(rule.id) {
            return Err(FormatterError::duplicate(rule.id));
        }

        let position = self
            .rules
            .iter()
            .rposition(|existing| existing.category <= rule.category)
            .map_or(0, |idx| idx + 1);
        self.rules.insert(position, rule);
        self.rebuild_index();
        Ok(())
    }

    /// Registers rules in order, stopping at the first duplicate.
    pub fn register_rules(
        &mut self,
        rules: impl IntoIterator<Item = FormatRule>,
    ) -> Result<(), FormatterError> {
        for rule in rules {
            self.register(rule)?;
        }
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| (rule.id, idx))
            .collect();
    }

    /// Looks up a rule by id.
    pub fn get(&self, id: &str) -> Option<&FormatRule> {
        self.index.get(id).map(|idx| &self.rules[*idx])
    }

    /// Returns true if a rule with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates over rules in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &FormatRule> {
        self.rules.iter()
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Ids of rules enabled by default.
    pub fn default_enabled_ids(&self) -> BTreeSet<String> {
        self.rules
            .iter()
            .filter(|rule| rule.enabled_by_default)
            .map(|rule| rule.id.to_string())
            .collect()
    }

    /// Returns the rules enabled under `options`, in registry order.
    ///
    /// Unknown ids in an explicit rule set are ignored.
    pub fn enabled_rules<'a>(&'a self, options: &RuleOptions) -> Vec<&'a FormatRule> {
        match &options.enabled_rules {
            Some(ids) => {
                for id in ids.iter().filter(|id| !self.contains(id)) {
                    debug!("Ignoring unknown rule id '{}'", id);
                }
                self.rules
                    .iter()
                    .filter(|rule| ids.contains(rule.id))
                    .collect()
            }
            None => self
                .rules
                .iter()
                .filter(|rule| rule.enabled_by_default)
                .collect(),
        }
    }

    /// Returns rule counts for diagnostics.
    pub fn stats(&self) -> RuleStats {
        let mut stats = RuleStats {
            total: self.rules.len(),
            ..RuleStats::default()
        };
        for category in RuleCategory::ALL {
            stats.by_category.insert(category, 0);
        }
        for rule in &self.rules {
            *stats.by_category.entry(rule.category).or_default() += 1;
            if rule.is_fixable() {
                stats.fixable += 1;
            }
            if rule.has_lint() {
                stats.lintable += 1;
            }
            if rule.enabled_by_default {
                stats.enabled_by_default += 1;
            }
        }
        stats
    }
}

/// Rule counts per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStats {
    /// Total number of rules.
    pub total: usize,
    /// Rules per category.
    pub by_category: BTreeMap<RuleCategory, usize>,
    /// Rules with a fix.
    pub fixable: usize,
    /// Rules with a lint.
    pub lintable: usize,
    /// Rules enabled by default.
    pub enabled_by_default: usize,
}
