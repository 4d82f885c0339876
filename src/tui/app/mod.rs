//! Application state and main event loop for the dashboard.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.

use crate::layout::{
    handle_drag, ComposeError, ConfigController, DragEvent, EventSource, LayoutAction, Offset,
};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::{self, render_dashboard};
use crate::widgets::WidgetRegistry;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Position, Rect};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

#[cfg(test)]
pub(crate) mod tests;

/// How long status messages stay in the header.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Errors that end the dashboard.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Terminal I/O failed.
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    /// A selected widget has no registered kind.
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// Screen area of a rendered tile, recorded during the last render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileHitbox {
    /// Widget name.
    pub name: String,
    /// Whole tile including borders.
    pub area: Rect,
    /// Close control in the title bar.
    pub close: Rect,
}

/// What a click on the configuration menu does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuTarget {
    /// Check box for the named widget.
    Toggle(String),
    /// The `[save]` button.
    Save,
    /// The `[reset]` button.
    Reset,
}

/// Drag gesture in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DragState {
    name: String,
    /// Pointer position relative to the tile's top-left corner.
    grab: (u16, u16),
    source: EventSource,
}

/// Main application state.
pub struct App {
    /// Set when the user asked to quit.
    pub should_quit: bool,
    /// Owner of the widget configuration.
    pub controller: ConfigController,
    registry: WidgetRegistry,
    tick_rate: Duration,
    /// Ticks since start, drives widget animation.
    pub tick_count: u64,
    /// Transient header message with its expiry.
    pub status_message: Option<(String, Instant)>,
    drag: Option<DragState>,
    /// Widget area of the last render.
    pub(crate) body_area: Option<Rect>,
    /// Tiles of the last render, bottom-most first.
    pub(crate) tiles: Vec<TileHitbox>,
    /// Menu entries of the last render.
    pub(crate) menu: Vec<(Rect, MenuTarget)>,
}

impl App {
    /// Creates the application around a loaded controller.
    pub fn new(controller: ConfigController, registry: WidgetRegistry, tick_rate: Duration) -> Self {
        Self {
            should_quit: false,
            controller,
            registry,
            tick_rate,
            tick_count: 0,
            status_message: None,
            drag: None,
            body_area: None,
            tiles: Vec::new(),
            menu: Vec::new(),
        }
    }

    /// Widget kinds available for rendering.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Name of the widget being dragged by its body, if any.
    pub fn dragging(&self) -> Option<&str> {
        self.drag
            .as_ref()
            .filter(|d| d.source == EventSource::Body)
            .map(|d| d.name.as_str())
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now() + STATUS_MESSAGE_TTL));
    }

    /// Clears the status message if its expiry time has passed.
    pub fn expire_status_message(&mut self) {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
            }
        }
    }

    /// Carries out an action. Returns `true` when the app should quit.
    pub(crate) fn perform(&mut self, action: Action) -> bool {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::Toggle(name) => self.controller.apply(LayoutAction::ToggleSelection(name)),
            Action::Save => self.save(),
            Action::Reset => {
                self.drag = None;
                self.controller.reset_to_default();
                self.set_status("Layout reset, press s to keep it");
            }
            Action::EndDrag => self.drag = None,
        }
        self.should_quit
    }

    fn save(&mut self) {
        match self.controller.request_save() {
            Ok(()) => {
                if self.controller.persistence_available() {
                    tracing::info!(
                        widgets = self.controller.config().len(),
                        "saved widget configuration"
                    );
                } else {
                    tracing::debug!("save skipped: persistence unavailable");
                }
            }
            Err(e) => {
                tracing::warn!("failed to save widget configuration: {}", e);
                self.set_status(format!("Save failed: {e}"));
            }
        }
    }

    /// Handles a mouse event against the hit areas of the last render.
    pub(crate) fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Action {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag_to(mouse.column, mouse.row);
                Action::None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag = None;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn press(&mut self, column: u16, row: u16) -> Action {
        let pos = Position::new(column, row);
        self.drag = None;

        if let Some((_, target)) = self.menu.iter().find(|(area, _)| area.contains(pos)) {
            return match target {
                MenuTarget::Toggle(name) => Action::Toggle(name.clone()),
                MenuTarget::Save => Action::Save,
                MenuTarget::Reset => Action::Reset,
            };
        }

        // Topmost tile wins: pinned tiles are recorded last.
        let Some(tile) = self.tiles.iter().rev().find(|t| t.area.contains(pos)) else {
            return Action::None;
        };
        if tile.close.contains(pos) {
            let name = tile.name.clone();
            self.drag = Some(DragState {
                name: name.clone(),
                grab: (0, 0),
                source: EventSource::Button,
            });
            return Action::Toggle(name);
        }
        self.drag = Some(DragState {
            name: tile.name.clone(),
            grab: (column - tile.area.x, row - tile.area.y),
            source: EventSource::Body,
        });
        Action::None
    }

    fn drag_to(&mut self, column: u16, row: u16) {
        let (Some(drag), Some(body)) = (&self.drag, self.body_area) else {
            return;
        };
        let target = Offset {
            x: i32::from(column) - i32::from(body.x) - i32::from(drag.grab.0),
            y: i32::from(row) - i32::from(body.y) - i32::from(drag.grab.1),
        };
        let Offset { x, y } = ui::clamp_offset(body, target);
        handle_drag(
            &mut self.controller,
            DragEvent {
                name: drag.name.clone(),
                x,
                y,
                source: drag.source,
            },
        );
    }

    /// Runs the dashboard: sets up terminal, enters event loop, restores on exit.
    pub async fn run(&mut self) -> Result<(), AppError> {
        // Restore the terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop().await;

        restore_terminal()?;
        result
    }

    /// Main event loop: renders and processes events.
    async fn event_loop(&mut self) -> Result<(), AppError> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let mut event_handler = EventHandler::new(self.tick_rate);
        let mut reader = EventStream::new();

        self.draw(&mut terminal)?;
        loop {
            let event = event_handler.next(&mut reader).await?;
            match event {
                Event::Key(key) => {
                    let action = handle_key_event(self, key);
                    if self.perform(action) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    let action = self.handle_mouse_event(mouse);
                    if self.perform(action) {
                        return Ok(());
                    }
                }
                Event::Tick => {
                    self.tick_count += 1;
                    self.expire_status_message();
                    self.controller.expire_confirmation(Instant::now());
                }
                Event::Resize(_, _) => {}
            }
            self.draw(&mut terminal)?;
        }
    }

    fn draw<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut outcome = Ok(());
        terminal.draw(|frame| {
            outcome = render_dashboard(frame, self);
        })?;
        outcome.map_err(AppError::from)
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
