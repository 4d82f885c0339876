//! Rendering of the dashboard.
//!
//! The screen has three bands: a one-line header (title, save
//! confirmation, status messages), the widget area, and a one-line
//! configuration menu. The widget area is split into a 3x2 grid whose
//! slots are named `a`..`f` left to right, top to bottom. Widgets with a
//! custom offset are drawn after the grid-placed ones, on top of them.

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use crate::layout::{compose, ComposeError, DisplayedWidget, Offset};
use crate::tui::app::{App, MenuTarget, TileHitbox};
use crate::widgets::WidgetContext;

/// Grid columns in the widget area.
pub const GRID_COLUMNS: u16 = 3;

/// Grid rows in the widget area.
pub const GRID_ROWS: u16 = 2;

/// Close control drawn at the right of each tile's title bar.
pub const CLOSE_BUTTON: &str = "[x]";

/// Text of the save confirmation.
pub const SAVED_MESSAGE: &str = "Saved";

/// Grid slot tokens in slot order.
const GRID_AREAS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

/// Renders the whole dashboard and records hit areas on `app`.
///
/// Fails if a selected widget has no registry entry.
pub fn render_dashboard(frame: &mut Frame, app: &mut App) -> Result<(), ComposeError> {
    let displayed = compose(app.controller.config(), app.registry())?;

    let [header, body, menu] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, app, header);
    render_widgets(frame, app, &displayed, body);
    render_menu(frame, app, menu);
    Ok(())
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::styled(
            " tile-dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        area,
    );

    let right = if app.controller.save_requested() {
        Some(Line::styled(
            format!("{SAVED_MESSAGE} "),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        app.status_message
            .as_ref()
            .map(|(msg, _)| Line::styled(format!("{msg} "), Style::default().fg(Color::Yellow)))
    };
    if let Some(line) = right {
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
    }
}

/// Size of one grid cell in `body`.
pub fn cell_size(body: Rect) -> (u16, u16) {
    (body.width / GRID_COLUMNS, body.height / GRID_ROWS)
}

/// Index of a grid slot token, if it names one.
pub fn grid_slot(grid_area: &str) -> Option<usize> {
    GRID_AREAS.iter().position(|a| *a == grid_area)
}

/// Area of grid slot `slot` inside `body`.
pub fn grid_rect(body: Rect, slot: usize) -> Rect {
    let (cw, ch) = cell_size(body);
    let col = slot as u16 % GRID_COLUMNS;
    let row = (slot as u16 / GRID_COLUMNS) % GRID_ROWS;
    Rect::new(body.x + col * cw, body.y + row * ch, cw, ch)
}

/// Clamps an offset so a cell-sized tile stays inside `body`.
pub fn clamp_offset(body: Rect, offset: Offset) -> Offset {
    let (cw, ch) = cell_size(body);
    let max_x = i32::from(body.width.saturating_sub(cw));
    let max_y = i32::from(body.height.saturating_sub(ch));
    Offset {
        x: offset.x.clamp(0, max_x),
        y: offset.y.clamp(0, max_y),
    }
}

/// Area of a tile pinned at `offset` inside `body`.
pub fn offset_rect(body: Rect, offset: Offset) -> Rect {
    let (cw, ch) = cell_size(body);
    let Offset { x, y } = clamp_offset(body, offset);
    // Clamped into 0..=u16 range above.
    Rect::new(body.x + x as u16, body.y + y as u16, cw, ch)
}

/// Hit area of the close control on a tile at `tile`.
pub fn close_button_rect(tile: Rect) -> Rect {
    let width = CLOSE_BUTTON.len() as u16;
    Rect::new(tile.right().saturating_sub(width + 1), tile.y, width, 1)
}

fn render_widgets(frame: &mut Frame, app: &mut App, displayed: &[DisplayedWidget], body: Rect) {
    app.body_area = Some(body);
    app.tiles.clear();

    let ctx = WidgetContext::new(Local::now(), app.tick_count);
    let dragging = app.dragging().map(str::to_string);

    let gridded = displayed.iter().enumerate().filter(|(_, w)| w.offset.is_none());
    let pinned = displayed.iter().enumerate().filter(|(_, w)| w.offset.is_some());

    for (index, widget) in gridded.chain(pinned) {
        let area = match widget.offset {
            Some(offset) => offset_rect(body, offset),
            None => grid_rect(body, grid_slot(&widget.grid_area).unwrap_or(index)),
        };
        if area.width < CLOSE_BUTTON.len() as u16 + 4 || area.height < 2 {
            continue;
        }
        if widget.offset.is_some() {
            frame.render_widget(Clear, area);
        }
        let highlighted = dragging.as_deref() == Some(widget.name.as_str());
        render_tile(frame, widget, area, &ctx, highlighted);
        app.tiles.push(TileHitbox {
            name: widget.name.clone(),
            area,
            close: close_button_rect(area),
        });
    }

    if displayed.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled(
                "No widgets selected. Press 1-6 or click the menu below.",
                Style::default().add_modifier(Modifier::DIM),
            ))
            .alignment(Alignment::Center),
            Rect::new(body.x, body.y + body.height / 2, body.width, body.height.min(1)),
        );
    }
}

fn render_tile(
    frame: &mut Frame,
    widget: &DisplayedWidget,
    area: Rect,
    ctx: &WidgetContext,
    highlighted: bool,
) {
    let border = if highlighted {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::bordered()
        .border_style(border)
        .title(format!(" {} ", widget.name))
        .title(Line::from(CLOSE_BUTTON).right_aligned());
    let inner = block.inner(area);
    let lines = widget.widget.render(inner.width, ctx);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_menu(frame: &mut Frame, app: &mut App, area: Rect) {
    app.menu.clear();

    let mut entries: Vec<(Span<'static>, Option<MenuTarget>)> = Vec::new();
    for (i, record) in app.controller.config().records().iter().enumerate() {
        let mark = if record.selected { "x" } else { " " };
        let style = if record.selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        entries.push((
            Span::styled(format!(" {}[{mark}] {} ", i + 1, record.name), style),
            Some(MenuTarget::Toggle(record.name.clone())),
        ));
    }
    entries.push((Span::raw("│"), None));
    entries.push((
        Span::styled(" [save] ", Style::default().add_modifier(Modifier::BOLD)),
        Some(MenuTarget::Save),
    ));
    entries.push((Span::raw(" [reset] "), Some(MenuTarget::Reset)));
    entries.push((
        Span::styled(" q quit", Style::default().add_modifier(Modifier::DIM)),
        None,
    ));

    let mut x = area.x;
    let mut spans = Vec::with_capacity(entries.len());
    for (span, target) in entries {
        let width = span.width() as u16;
        if let Some(target) = target {
            let visible = width.min(area.right().saturating_sub(x));
            if visible > 0 {
                app.menu.push((Rect::new(x, area.y, visible, 1), target));
            }
        }
        x = x.saturating_add(width);
        spans.push(span);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
