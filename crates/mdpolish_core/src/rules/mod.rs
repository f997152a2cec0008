//! Built-in rules, one module per category.

pub mod academic;
pub mod blockquote;
pub mod code_block;
pub mod heading;
pub mod list;
pub mod whitespace;
pub mod writing;

use crate::rule::FormatRule;

/// Every built-in rule, in category order.
pub(crate) fn builtin_rules() -> Vec<FormatRule> {
    [
        whitespace::rules(),
        heading::rules(),
        list::rules(),
        blockquote::rules(),
        code_block::rules(),
        writing::rules(),
        academic::rules(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
