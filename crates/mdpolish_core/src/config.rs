//! Formatter configuration documents (`.mdpolish.jsonc`).
//!
//! Parsing is pure: the caller reads the file and hands over its text.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{CitationStyle, FormatEngineOptions, FormatterError, RuleOptions, RuleRegistry, find_preset};

const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatterConfig {
    /// Schema reference, accepted so editors can validate the file.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preset providing the base rule set and options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Rule id to enabled flag, applied on top of the base rule set.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, bool>,

    /// Option overrides applied on top of the base options.
    pub options: OptionOverrides,
}

/// Rule option overrides. Absent fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heading_depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_paragraph_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation_style: Option<CitationStyle>,
}

impl OptionOverrides {
    fn apply(&self, options: &mut RuleOptions) {
        if let Some(depth) = self.max_heading_depth {
            options.max_heading_depth = depth;
        }
        if let Some(chars) = self.max_paragraph_chars {
            options.max_paragraph_chars = chars;
        }
        if let Some(format) = &self.figure_format {
            options.figure_format = format.clone();
        }
        if let Some(format) = &self.table_format {
            options.table_format = format.clone();
        }
        if let Some(style) = self.citation_style {
            options.citation_style = style;
        }
    }
}

impl FormatterConfig {
    /// Configuration file names, in lookup order.
    pub const CONFIG_FILES: [&'static str; 2] = [".mdpolish.jsonc", ".mdpolish.json"];

    /// Creates an empty configuration (registry defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from a JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, FormatterError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| FormatterError::config(format!("Invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Parses configuration from JSONC (comments and trailing commas allowed).
    pub fn from_jsonc(text: &str) -> Result<Self, FormatterError> {
        let value = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
            .map_err(|e| FormatterError::config(format!("Invalid JSONC: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> Result<Self, FormatterError> {
        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(FormatterError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| FormatterError::config(format!("Invalid config: {}", e)))
    }

    /// Resolves the configuration into engine options.
    ///
    /// The base is the preset (when known) or the registry defaults; `rules`
    /// and `options` are then layered on top. Unknown rule ids are an error.
    pub fn resolve(&self, registry: &RuleRegistry) -> Result<FormatEngineOptions, FormatterError> {
        let preset = self.preset.as_deref().and_then(|name| {
            let found = find_preset(name);
            if found.is_none() {
                warn!("Unknown preset '{}' in configuration, using defaults", name);
            }
            found
        });

        let mut options = match preset {
            Some(preset) => preset.to_options(),
            None => RuleOptions {
                enabled_rules: Some(registry.default_enabled_ids()),
                ..RuleOptions::default()
            },
        };

        let enabled = options.enabled_rules.get_or_insert_with(Default::default);
        for (id, on) in &self.rules {
            if !registry.contains(id) {
                return Err(FormatterError::config(format!("Unknown rule '{}'", id)));
            }
            if *on {
                enabled.insert(id.clone());
            } else {
                enabled.remove(id);
            }
        }

        self.options.apply(&mut options);
        Ok(FormatEngineOptions::new().with_rules(options))
    }

    /// Computes a fingerprint of the configuration.
    pub fn hash(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn parses_full_document() {
        let json = r#"{
            "preset": "ieee",
            "rules": { "long-paragraph": true, "keywords-format": false },
            "options": { "maxHeadingDepth": 2, "citationStyle": "acm" }
        }"#;
        let config = FormatterConfig::from_json(json).unwrap();
        assert_eq!(config.preset.as_deref(), Some("ieee"));
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.options.max_heading_depth, Some(2));
        assert_eq!(config.options.citation_style, Some(CitationStyle::Acm));
    }

    #[test]
    fn jsonc_allows_comments() {
        let text = r#"{
            // journal style
            "preset": "apa",
            "rules": { "final-newline": false, },
        }"#;
        let config = FormatterConfig::from_jsonc(text).unwrap();
        assert_eq!(config.preset.as_deref(), Some("apa"));
        assert_eq!(config.rules.get("final-newline"), Some(&false));
    }

    #[test]
    fn empty_jsonc_is_default() {
        assert_eq!(FormatterConfig::from_jsonc("").unwrap(), FormatterConfig::new());
    }

    #[rstest]
    #[case::unknown_property(r#"{ "presets": "ieee" }"#)]
    #[case::type_mismatch(r#"{ "rules": { "final-newline": "yes" } }"#)]
    #[case::invalid_enum_value(r#"{ "options": { "citationStyle": "mla" } }"#)]
    #[case::out_of_range(r#"{ "options": { "maxHeadingDepth": 9 } }"#)]
    fn rejects_invalid_documents(#[case] json: &str) {
        let err = FormatterConfig::from_json(json).unwrap_err();
        assert!(
            err.to_string().contains("Config validation failed"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn resolve_layers_rules_and_options_on_preset() {
        let registry = RuleRegistry::with_builtin_rules();
        let config = FormatterConfig::from_json(
            r#"{ "preset": "apa", "rules": { "keywords-format": false, "long-paragraph": true },
                 "options": { "maxParagraphChars": 400 } }"#,
        )
        .unwrap();
        let options = config.resolve(&registry).unwrap();
        let rules = &options.rules;
        let enabled = rules.enabled_rules.as_ref().unwrap();
        assert!(!enabled.contains("keywords-format"));
        assert!(enabled.contains("long-paragraph"));
        assert!(enabled.contains("citation-format"));
        assert_eq!(rules.citation_style, CitationStyle::Apa);
        assert_eq!(rules.max_paragraph_chars, 400);
        assert!(options.preset.is_none());
    }

    #[test]
    fn resolve_without_preset_starts_from_defaults() {
        let registry = RuleRegistry::with_builtin_rules();
        let config = FormatterConfig::from_json(r#"{ "rules": { "heading-numbering": true } }"#)
            .unwrap();
        let enabled = config.resolve(&registry).unwrap().rules.enabled_rules.unwrap();
        assert_eq!(enabled.len(), registry.default_enabled_ids().len() + 1);
    }

    #[test]
    fn resolve_rejects_unknown_rule() {
        let registry = RuleRegistry::with_builtin_rules();
        let config = FormatterConfig::from_json(r#"{ "rules": { "no-such-rule": true } }"#).unwrap();
        let err = config.resolve(&registry).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Unknown rule 'no-such-rule'");
    }

    #[test]
    fn hash_changes_with_content() {
        let a = FormatterConfig::from_json(r#"{ "preset": "ieee" }"#).unwrap();
        let b = FormatterConfig::from_json(r#"{ "preset": "acm" }"#).unwrap();
        assert_eq!(a.hash(), a.clone().hash());
        assert_ne!(a.hash(), b.hash());
    }
}
