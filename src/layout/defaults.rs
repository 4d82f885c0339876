//! Built-in baseline configuration.
//!
//! Every call to [`build_default`] returns freshly allocated records, so
//! mutating one configuration can never leak into another.

use super::record::{Configuration, WidgetRecord};

/// Widget kinds and their default grid slots, in display order.
pub const BASELINE: &[(&str, &str)] = &[
    ("Clock", "a"),
    ("News", "b"),
    ("Quote", "c"),
    ("Stocks", "d"),
    ("ToDo", "e"),
    ("Weather", "f"),
];

/// Builds the baseline configuration: every widget kind present,
/// unselected, placed in its grid slot.
pub fn build_default() -> Configuration {
    Configuration::new(
        BASELINE
            .iter()
            .map(|(name, area)| WidgetRecord::new(name, area))
            .collect(),
    )
}
