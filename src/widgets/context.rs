//! Widget context providing shared state for widget rendering.

use chrono::{DateTime, Local};

/// Shared context passed to widgets during rendering.
#[derive(Debug, Clone, Copy)]
pub struct WidgetContext {
    /// Wall-clock time of the current frame.
    pub now: DateTime<Local>,

    /// Count of UI ticks so far, for widgets that rotate content.
    pub tick: u64,
}

impl WidgetContext {
    /// Creates a context for the frame at `now`.
    pub fn new(now: DateTime<Local>, tick: u64) -> Self {
        Self { now, tick }
    }
}
