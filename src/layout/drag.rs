//! Drag input filtering.
//!
//! Widgets embed small controls (the close button in each title bar).
//! Pointer activity that starts on one of those must not move the widget.

use super::controller::{ConfigController, LayoutAction};

/// What the pointer was over when the drag started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    /// The widget body or title.
    Body,
    /// An interactive control inside the widget.
    Button,
}

/// A drag move or drag end for one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEvent {
    /// Name of the dragged widget.
    pub name: String,
    /// New horizontal offset.
    pub x: i32,
    /// New vertical offset.
    pub y: i32,
    /// Element under the pointer at drag start.
    pub source: EventSource,
}

impl DragEvent {
    /// Converts the event into a position update, or `None` for events
    /// coming from an embedded button.
    pub fn into_action(self) -> Option<LayoutAction> {
        match self.source {
            EventSource::Button => None,
            EventSource::Body => Some(LayoutAction::UpdatePosition {
                name: self.name,
                x: self.x,
                y: self.y,
            }),
        }
    }
}

/// Forwards a drag to [`ConfigController::update_position`] unless it
/// originated on a button. Returns `true` if the configuration was updated.
pub fn handle_drag(controller: &mut ConfigController, event: DragEvent) -> bool {
    match event.into_action() {
        Some(action) => {
            controller.apply(action);
            true
        }
        None => {
            tracing::trace!("drag from button control ignored");
            false
        }
    }
}
