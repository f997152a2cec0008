//! Presets command implementation

use mdpolish_core::presets;

pub fn run_presets() {
    for preset in presets() {
        println!(
            "{:<10} {} ({} rules)",
            preset.name,
            preset.description,
            preset.enabled_rules.len()
        );
    }
}
