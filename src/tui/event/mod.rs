//! Event handling for the dashboard.
//!
//! Wraps crossterm events and adds a tick variant for periodic redraws.

use crate::tui::app::App;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};


/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for redraws and expiring messages.
    Tick,
}

/// Merges terminal input with a steady redraw tick.
pub struct EventHandler {
    tick: Interval,
}

impl EventHandler {
    /// Creates a handler ticking every `tick_rate`. The first tick fires
    /// immediately. Must be called inside a tokio runtime.
    pub fn new(tick_rate: Duration) -> Self {
        let mut tick = interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { tick }
    }

    /// Period between ticks.
    pub fn tick_rate(&self) -> Duration {
        self.tick.period()
    }

    /// Waits for the next terminal event or tick, whichever comes first.
    ///
    /// Input does not reset the tick schedule.
    pub async fn next(&mut self, reader: &mut EventStream) -> std::io::Result<Event> {
        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) => return Ok(Event::Key(key)),
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Focus and paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "terminal event stream closed",
                        )),
                    }
                }
                _ = self.tick.tick() => return Ok(Event::Tick),
            }
        }
    }
}

/// Action produced by a key press or a menu click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Flip selection of the named widget.
    Toggle(String),
    /// Persist the current configuration.
    Save,
    /// Replace the in-memory configuration with the default.
    Reset,
    /// Stop moving the dragged widget. It keeps the position it was last
    /// dragged to.
    EndDrag,
}

/// Maps a key press to an [`Action`].
///
/// Digit keys `1`..`9` address records in configuration order; digits past
/// the end of the configuration do nothing.
pub fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('s') => Action::Save,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Esc => Action::EndDrag,
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.controller
                .config()
                .records()
                .get(index)
                .map(|record| Action::Toggle(record.name.clone()))
                .unwrap_or(Action::None)
        }
        _ => Action::None,
    }
}
