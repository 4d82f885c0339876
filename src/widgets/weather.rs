//! Weather widget: current conditions for one location.

use super::{truncate, Widget, WidgetContext};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Line,
};

/// Registry name.
pub const NAME: &str = "Weather";

/// A conditions report.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    /// Temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Short description (e.g. "Light rain").
    pub summary: String,
}

/// Conditions for a named location.
pub struct WeatherWidget {
    location: String,
    conditions: Option<Conditions>,
}

impl WeatherWidget {
    /// Widget for `location`, with conditions if known.
    pub fn new(location: &str, conditions: Option<Conditions>) -> Self {
        Self {
            location: location.to_string(),
            conditions,
        }
    }
}

/// Factory function for the widget registry.
pub fn create() -> Box<dyn Widget> {
    Box::new(WeatherWidget::new("Home", None))
}

impl Widget for WeatherWidget {
    fn render(&self, width: u16, _context: &WidgetContext) -> Vec<Line<'static>> {
        let w = width as usize;
        let mut lines = vec![Line::styled(
            truncate(&self.location, w),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        match &self.conditions {
            Some(c) => {
                lines.push(Line::styled(
                    truncate(&format!("{:.0}°C", c.temperature_c), w),
                    Style::default().fg(Color::Yellow),
                ));
                lines.push(Line::raw(truncate(&c.summary, w)));
            }
            None => lines.push(Line::styled(
                truncate("No data", w),
                Style::default().add_modifier(Modifier::DIM),
            )),
        }
        lines
    }

    fn id(&self) -> &'static str {
        NAME
    }
}
