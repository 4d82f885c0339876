//! Clock widget: local time and date.

use super::{truncate, Widget, WidgetContext};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Line,
};

/// Registry name.
pub const NAME: &str = "Clock";

/// Shows the local time (`HH:MM:SS`) over the date.
pub struct ClockWidget;

/// Factory function for the widget registry.
pub fn create() -> Box<dyn Widget> {
    Box::new(ClockWidget)
}

impl Widget for ClockWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let w = width as usize;
        let time = context.now.format("%H:%M:%S").to_string();
        let date = context.now.format("%a %d %b %Y").to_string();
        vec![
            Line::styled(
                truncate(&time, w),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::raw(truncate(&date, w)),
        ]
    }

    fn id(&self) -> &'static str {
        NAME
    }
}
