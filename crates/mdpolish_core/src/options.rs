//! Rule options consumed by individual rules.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Citation style expected by the academic rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationStyle {
    /// Numeric `[n]` citations (IEEE).
    #[default]
    Ieee,
    /// Numeric `[n]` citations (ACM).
    Acm,
    /// Author-year `(Author, Year)` citations (APA).
    Apa,
}

impl CitationStyle {
    /// Returns true for bracket-numbered styles.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Ieee | Self::Acm)
    }

    /// Returns the lowercase style name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ieee => "ieee",
            Self::Acm => "acm",
            Self::Apa => "apa",
        }
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CitationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ieee" => Ok(Self::Ieee),
            "acm" => Ok(Self::Acm),
            "apa" => Ok(Self::Apa),
            other => Err(format!("unknown citation style '{other}'")),
        }
    }
}

/// Configuration record shared by all rules.
///
/// Absent fields fall back to the defaults below when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleOptions {
    /// Explicit set of enabled rule ids. `None` means registry defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_rules: Option<BTreeSet<String>>,

    /// Deepest heading level allowed by `heading-depth` (default 4).
    pub max_heading_depth: usize,

    /// Character budget for one paragraph (default 800).
    pub max_paragraph_chars: usize,

    /// Figure caption format, label plus punctuation (default `"Figure 1:"`).
    pub figure_format: String,

    /// Table caption format (default `"Table 1:"`).
    pub table_format: String,

    /// Citation style (default IEEE).
    pub citation_style: CitationStyle,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            enabled_rules: None,
            max_heading_depth: 4,
            max_paragraph_chars: 800,
            figure_format: "Figure 1:".to_string(),
            table_format: "Table 1:".to_string(),
            citation_style: CitationStyle::Ieee,
        }
    }
}

impl RuleOptions {
    /// Creates options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts evaluation to the given rule ids.
    pub fn with_enabled_rules<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled_rules = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the citation style.
    pub fn with_citation_style(mut self, style: CitationStyle) -> Self {
        self.citation_style = style;
        self
    }

    /// Sets the maximum heading depth.
    pub fn with_max_heading_depth(mut self, depth: usize) -> Self {
        self.max_heading_depth = depth;
        self
    }

    /// Sets the paragraph character budget.
    pub fn with_max_paragraph_chars(mut self, chars: usize) -> Self {
        self.max_paragraph_chars = chars;
        self
    }

    /// Sets the figure caption format.
    pub fn with_figure_format(mut self, format: impl Into<String>) -> Self {
        self.figure_format = format.into();
        self
    }

    /// Sets the table caption format.
    pub fn with_table_format(mut self, format: impl Into<String>) -> Self {
        self.table_format = format.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = RuleOptions::default();
        assert_eq!(options.max_heading_depth, 4);
        assert_eq!(options.max_paragraph_chars, 800);
        assert_eq!(options.figure_format, "Figure 1:");
        assert_eq!(options.table_format, "Table 1:");
        assert_eq!(options.citation_style, CitationStyle::Ieee);
        assert!(options.enabled_rules.is_none());
    }

    #[test]
    fn absent_fields_fall_back_to_defaults() {
        let options: RuleOptions =
            serde_json::from_str(r#"{ "citationStyle": "apa", "maxHeadingDepth": 3 }"#).unwrap();
        assert_eq!(options.citation_style, CitationStyle::Apa);
        assert_eq!(options.max_heading_depth, 3);
        assert_eq!(options.max_paragraph_chars, 800);
    }

    #[test]
    fn citation_style_from_str() {
        assert_eq!("IEEE".parse::<CitationStyle>(), Ok(CitationStyle::Ieee));
        assert_eq!("apa".parse::<CitationStyle>(), Ok(CitationStyle::Apa));
        assert!("mla".parse::<CitationStyle>().is_err());
        assert!(CitationStyle::Acm.is_numeric());
        assert!(!CitationStyle::Apa.is_numeric());
    }
}
