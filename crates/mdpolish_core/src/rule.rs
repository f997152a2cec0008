//! The rule model shared by every built-in and host-provided rule.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{LintResult, RuleOptions};

/// Rewrites content. Must be deterministic and idempotent.
pub type FixFn = fn(&str, &RuleOptions) -> String;

/// Reports issues without touching content.
pub type LintFn = fn(&str, &RuleOptions) -> Vec<LintResult>;

/// Rule category. Registry order follows declaration order here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    Whitespace,
    Heading,
    List,
    Blockquote,
    CodeBlock,
    Writing,
    Academic,
}

impl RuleCategory {
    /// All categories in registry order.
    pub const ALL: [Self; 7] = [
        Self::Whitespace,
        Self::Heading,
        Self::List,
        Self::Blockquote,
        Self::CodeBlock,
        Self::Writing,
        Self::Academic,
    ];

    /// Returns the kebab-case category name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Heading => "heading",
            Self::List => "list",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "code-block",
            Self::Writing => "writing",
            Self::Academic => "academic",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a rule can do. Every rule has at least one capability.
#[derive(Clone, Copy)]
pub enum RuleKind {
    FixOnly(FixFn),
    LintOnly(LintFn),
    FixAndLint(FixFn, LintFn),
}

impl RuleKind {
    /// Returns the fix function, if any.
    pub fn fix(&self) -> Option<FixFn> {
        match *self {
            Self::FixOnly(fix) | Self::FixAndLint(fix, _) => Some(fix),
            Self::LintOnly(_) => None,
        }
    }

    /// Returns the lint function, if any.
    pub fn lint(&self) -> Option<LintFn> {
        match *self {
            Self::LintOnly(lint) | Self::FixAndLint(_, lint) => Some(lint),
            Self::FixOnly(_) => None,
        }
    }
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FixOnly(_) => "FixOnly",
            Self::LintOnly(_) => "LintOnly",
            Self::FixAndLint(..) => "FixAndLint",
        };
        f.write_str(name)
    }
}

/// A formatting or lint rule.
#[derive(Debug, Clone)]
pub struct FormatRule {
    /// Unique, stable identifier (e.g. `heading-space`).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Category the rule belongs to.
    pub category: RuleCategory,
    /// Whether the rule runs when no explicit rule set is given.
    pub enabled_by_default: bool,
    /// Capabilities.
    pub kind: RuleKind,
}

impl FormatRule {
    /// Creates a rule that is enabled by default.
    pub fn new(id: &'static str, category: RuleCategory, kind: RuleKind) -> Self {
        Self {
            id,
            name: id,
            description: "",
            category,
            enabled_by_default: true,
            kind,
        }
    }

    /// Sets the display name.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Sets the description.
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Marks the rule as opt-in.
    pub fn disabled_by_default(mut self) -> Self {
        self.enabled_by_default = false;
        self
    }

    /// Returns true if the rule rewrites content.
    pub fn is_fixable(&self) -> bool {
        self.kind.fix().is_some()
    }

    /// Returns true if the rule reports lint results.
    pub fn has_lint(&self) -> bool {
        self.kind.lint().is_some()
    }

    /// Applies the fix, or returns `None` for lint-only rules.
    pub fn fix(&self, content: &str, options: &RuleOptions) -> Option<String> {
        self.kind.fix().map(|fix| fix(content, options))
    }

    /// Runs the lint, or returns `None` for fix-only rules.
    pub fn lint(&self, content: &str, options: &RuleOptions) -> Option<Vec<LintResult>> {
        self.kind.lint().map(|lint| lint(content, options))
    }
}
