//! To-do widget: a short check list.

use super::{truncate, Widget, WidgetContext};
use ratatui::{
    style::{Modifier, Style},
    text::Line,
};

/// Registry name.
pub const NAME: &str = "ToDo";

/// One check-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// Entry text.
    pub text: String,
    /// Whether the entry is done.
    pub done: bool,
}

/// Check list of to-do items.
pub struct TodoWidget {
    items: Vec<TodoItem>,
}

impl TodoWidget {
    /// Widget over the given items.
    pub fn with_items(items: Vec<TodoItem>) -> Self {
        Self { items }
    }
}

/// Factory function for the widget registry.
pub fn create() -> Box<dyn Widget> {
    Box::new(TodoWidget::with_items(vec![
        TodoItem {
            text: "Drag widgets to arrange them".to_string(),
            done: false,
        },
        TodoItem {
            text: "Press s to save the layout".to_string(),
            done: false,
        },
    ]))
}

impl Widget for TodoWidget {
    fn render(&self, width: u16, _context: &WidgetContext) -> Vec<Line<'static>> {
        if self.items.is_empty() {
            return vec![Line::styled(
                "Nothing to do",
                Style::default().add_modifier(Modifier::DIM),
            )];
        }
        let w = (width as usize).saturating_sub(4);
        self.items
            .iter()
            .map(|item| {
                let mark = if item.done { "[x]" } else { "[ ]" };
                let text = format!("{mark} {}", truncate(&item.text, w));
                if item.done {
                    Line::styled(text, Style::default().add_modifier(Modifier::CROSSED_OUT))
                } else {
                    Line::raw(text)
                }
            })
            .collect()
    }

    fn id(&self) -> &'static str {
        NAME
    }
}
