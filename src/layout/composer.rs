//! Derives the list of widgets to display from the configuration.
//!
//! [`compose`] is called on every render. It keeps selected records in
//! configuration order and pairs each with a widget instance from the
//! registry, its placement and callbacks bound to the record's name.

use thiserror::Error;

use super::controller::LayoutAction;
use super::position::resolve;
use super::record::{Configuration, Offset};
use crate::widgets::{Widget, WidgetRegistry};

/// Errors raised while composing the display list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// A configured widget has no entry in the registry.
    #[error("No widget registered for '{name}'")]
    UnknownWidget {
        /// Name found in the configuration.
        name: String,
    },
}

/// Rendering identity of a displayed widget.
///
/// Derived from the widget name, so it stays the same across
/// recompositions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetKey(String);

impl WidgetKey {
    /// Key for the widget called `name`.
    pub fn for_name(name: &str) -> Self {
        Self(format!("widget:{name}"))
    }

    /// Key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One widget ready to render.
pub struct DisplayedWidget {
    /// Stable rendering identity.
    pub key: WidgetKey,
    /// Widget-kind name.
    pub name: String,
    /// Default grid slot.
    pub grid_area: String,
    /// Custom offset, if the user has dragged this widget.
    pub offset: Option<Offset>,
    /// Live widget instance.
    pub widget: Box<dyn Widget>,
}

impl DisplayedWidget {
    /// Position-update callback bound to this widget.
    pub fn on_drag(&self, x: i32, y: i32) -> LayoutAction {
        LayoutAction::UpdatePosition {
            name: self.name.clone(),
            x,
            y,
        }
    }

    /// Selection-toggle callback bound to this widget.
    pub fn on_toggle(&self) -> LayoutAction {
        LayoutAction::ToggleSelection(self.name.clone())
    }
}

impl std::fmt::Debug for DisplayedWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayedWidget")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("grid_area", &self.grid_area)
            .field("offset", &self.offset)
            .field("widget", &self.widget.id())
            .finish()
    }
}

/// Builds the display list for `config`.
///
/// Fails with [`ComposeError::UnknownWidget`] if a selected record names a
/// widget the registry cannot create.
pub fn compose(
    config: &Configuration,
    registry: &WidgetRegistry,
) -> Result<Vec<DisplayedWidget>, ComposeError> {
    config
        .selected()
        .map(|record| {
            let widget = registry
                .create(&record.name)
                .ok_or_else(|| ComposeError::UnknownWidget {
                    name: record.name.clone(),
                })?;
            Ok(DisplayedWidget {
                key: WidgetKey::for_name(&record.name),
                name: record.name.clone(),
                grid_area: record.position_data.grid_area.clone(),
                offset: resolve(record),
                widget,
            })
        })
        .collect()
}
