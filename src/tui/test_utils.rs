//! Shared helpers for dashboard tests with ratatui's TestBackend.

#![cfg(test)]

use crate::tui::app::App;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Finds the first row index that contains the given text.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    (0..buffer.area().height).find(|&row| row_text(buffer, row).contains(text))
}

/// Column of the first occurrence of `text` in `row`, counted in cells.
pub fn find_column(buffer: &Buffer, row: u16, text: &str) -> Option<u16> {
    let line = row_text(buffer, row);
    line.find(text)
        .map(|byte| line[..byte].chars().count() as u16)
}

/// Renders the full dashboard and returns the buffer for inspection.
pub fn render_dashboard_to_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| {
            crate::tui::ui::render_dashboard(frame, app).expect("render failed");
        })
        .expect("draw failed");
    terminal.backend().buffer().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_text_extracts_row_content() {
        let mut terminal = test_terminal(20, 5);
        terminal
            .draw(|frame| {
                let para = ratatui::widgets::Paragraph::new("Hello World");
                frame.render_widget(para, frame.area());
            })
            .expect("draw failed");
        assert!(row_text(terminal.backend().buffer(), 0).contains("Hello World"));
    }

    #[test]
    fn test_find_column_counts_cells_not_bytes() {
        let mut terminal = test_terminal(20, 1);
        terminal
            .draw(|frame| {
                let para = ratatui::widgets::Paragraph::new("││ab");
                frame.render_widget(para, frame.area());
            })
            .expect("draw failed");
        assert_eq!(find_column(terminal.backend().buffer(), 0, "ab"), Some(2));
    }
}
