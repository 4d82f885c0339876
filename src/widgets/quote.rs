//! Quote widget: one quotation per day.

use super::{truncate, Widget, WidgetContext};
use chrono::Datelike;
use ratatui::{
    style::{Modifier, Style},
    text::Line,
};

/// Registry name.
pub const NAME: &str = "Quote";

const QUOTES: &[(&str, &str)] = &[
    ("Simplicity is prerequisite for reliability.", "Edsger W. Dijkstra"),
    ("Well begun is half done.", "Aristotle"),
    ("Make it work, make it right, make it fast.", "Kent Beck"),
    ("The best way out is always through.", "Robert Frost"),
    ("Little by little, one travels far.", "J. R. R. Tolkien"),
];

/// Shows the quote of the day, chosen by day of year.
pub struct QuoteWidget;

/// Factory function for the widget registry.
pub fn create() -> Box<dyn Widget> {
    Box::new(QuoteWidget)
}

impl Widget for QuoteWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let w = width as usize;
        let (text, author) = QUOTES[context.now.ordinal0() as usize % QUOTES.len()];
        vec![
            Line::styled(
                truncate(&format!("“{text}”"), w),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
            Line::styled(
                truncate(&format!("— {author}"), w),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]
    }

    fn id(&self) -> &'static str {
        NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn same_day_same_quote() {
        let morning = Local
            .with_ymd_and_hms(2024, 5, 1, 8, 0, 0)
            .single()
            .expect("unambiguous");
        let evening = Local
            .with_ymd_and_hms(2024, 5, 1, 20, 0, 0)
            .single()
            .expect("unambiguous");
        let a = QuoteWidget.render(80, &WidgetContext::new(morning, 0));
        let b = QuoteWidget.render(80, &WidgetContext::new(evening, 7));
        assert_eq!(a, b);
    }

    #[test]
    fn first_day_of_year_uses_first_quote() {
        let day = Local
            .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .single()
            .expect("unambiguous");
        let lines = QuoteWidget.render(80, &WidgetContext::new(day, 0));
        assert!(lines[1].to_string().contains("Dijkstra"));
    }
}
