//! Rules command implementation

use mdpolish_core::{RuleCategory, initialize_rules};

pub fn run_rules() {
    let registry = initialize_rules();

    for category in RuleCategory::ALL {
        let rules: Vec<_> = registry.iter().filter(|r| r.category == category).collect();
        if rules.is_empty() {
            continue;
        }

        println!("\n{}:", category);
        for rule in rules {
            let mut flags = Vec::new();
            if rule.is_fixable() {
                flags.push("fix");
            }
            if rule.has_lint() {
                flags.push("lint");
            }
            if !rule.enabled_by_default {
                flags.push("off");
            }
            println!(
                "  {:<24} [{}] {}",
                rule.id,
                flags.join(","),
                rule.description
            );
        }
    }

    let stats = registry.stats();
    println!();
    println!(
        "{} rules ({} fixable, {} with lint, {} enabled by default)",
        stats.total, stats.fixable, stats.lintable, stats.enabled_by_default
    );
}
