//! Init command implementation

use std::path::PathBuf;

use mdpolish_core::FormatterConfig;
use miette::{IntoDiagnostic, Result};
use tracing::info;

const DEFAULT_CONFIG: &str = r#"{
  // Preset: standard, minimal, strict, ieee, acm or apa
  "preset": "standard",
  // Per-rule overrides, e.g. "long-paragraph": false
  "rules": {},
  "options": {
    "maxHeadingDepth": 4,
    "maxParagraphChars": 800
  }
}
"#;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(FormatterConfig::CONFIG_FILES[0]);

    let mut options = std::fs::OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    match options.open(&config_path) {
        Ok(mut file) => {
            use std::io::Write;
            file.write_all(DEFAULT_CONFIG.as_bytes()).into_diagnostic()?;
            info!("Created {}", config_path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Err(miette::miette!(
            "Config file already exists. Use --force to overwrite."
        )),
        Err(e) => Err(e).into_diagnostic(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FormatterConfig::from_jsonc(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("standard"));
        assert_eq!(config.options.max_heading_depth, Some(4));
    }
}
