//! Formatter error types.

use thiserror::Error;

/// Errors that can occur while setting up the formatter.
///
/// Formatting and linting themselves never fail: malformed Markdown simply
/// produces no findings.
#[derive(Debug, Error)]
pub enum FormatterError {
    /// A rule with the same id is already registered.
    #[error("Duplicate rule id: {0}")]
    DuplicateRuleId(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FormatterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a duplicate rule id error.
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateRuleId(id.into())
    }
}
