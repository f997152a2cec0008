//! # mdpolish_core
//!
//! Markdown formatting and linting engine for mdpolish.
//!
//! This crate provides:
//! - An ordered registry of fix and lint rules, including academic-writing checks
//! - The format engine and diff-aware lint context
//! - Built-in presets and configuration documents
//! - Undo/redo snapshots
//! - JSON, Markdown and SARIF report exporters
//!
//! The engine performs no I/O: callers pass text in and receive results back.
//!
//! ## Example
//!
//! ```rust
//! use mdpolish_core::{FormatEngineOptions, format};
//!
//! let result = format("#Title\n", &FormatEngineOptions::new());
//! assert_eq!(result.formatted, "# Title\n");
//! assert!(result.has_changes);
//! ```

mod config;
pub mod context;
mod engine;
mod error;
pub mod formatters;
mod options;
mod preset;
mod registry;
mod result;
mod rule;
pub mod rules;
pub mod scan;
pub mod snapshot;

pub use config::{FormatterConfig, OptionOverrides};
pub use context::LintContext;
pub use engine::{FormatEngine, FormatEngineOptions, format, lint};
pub use error::FormatterError;
pub use formatters::{
    SarifLog, export_to_json, export_to_markdown, export_to_sarif, export_to_sarif_with_uri,
    generate_sarif,
};
pub use options::{CitationStyle, RuleOptions};
pub use preset::{Preset, find_preset, presets};
pub use registry::{RuleRegistry, RuleStats, initialize_rules};
pub use result::{FormatResult, LintResult, Severity};
pub use rule::{FixFn, FormatRule, LintFn, RuleCategory, RuleKind};
pub use scan::count_lines;
pub use snapshot::{HistoryItem, RuleState, Snapshot, SnapshotManager};
