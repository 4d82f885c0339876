//! News widget: a short list of headlines.
//!
//! Headlines come from a fixed feed; the widget shows as many as fit,
//! scrolling through the feed one entry every few ticks.

use super::{truncate, Widget, WidgetContext};
use ratatui::{
    style::{Modifier, Style},
    text::Line,
};

/// Registry name.
pub const NAME: &str = "News";

/// Ticks between scroll steps.
const SCROLL_EVERY: u64 = 40;

/// Lines shown at once.
const VISIBLE: usize = 3;

const FEED: &[&str] = &[
    "Local library extends weekend opening hours",
    "City council approves new cycling lanes",
    "Researchers map deep-sea coral reef",
    "Regional rail timetable changes next month",
    "Community garden opens second site",
];

/// Rotating list of headlines.
pub struct NewsWidget {
    headlines: Vec<String>,
}

impl NewsWidget {
    /// Widget showing the given headlines.
    pub fn with_headlines(headlines: Vec<String>) -> Self {
        Self { headlines }
    }
}

/// Factory function for the widget registry.
pub fn create() -> Box<dyn Widget> {
    Box::new(NewsWidget::with_headlines(
        FEED.iter().map(|s| s.to_string()).collect(),
    ))
}

impl Widget for NewsWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        if self.headlines.is_empty() {
            return vec![Line::styled(
                "(no headlines)",
                Style::default().add_modifier(Modifier::DIM),
            )];
        }
        let w = (width as usize).saturating_sub(2);
        let start = (context.tick / SCROLL_EVERY) as usize % self.headlines.len();
        self.headlines
            .iter()
            .cycle()
            .skip(start)
            .take(VISIBLE.min(self.headlines.len()))
            .map(|h| Line::raw(format!("• {}", truncate(h, w))))
            .collect()
    }

    fn id(&self) -> &'static str {
        NAME
    }
}
