//! Widget configuration model.
//!
//! The configuration is an ordered list of per-widget records (selection,
//! grid slot, optional custom offset). It is created once per session from
//! the store or the built-in default, changed by user interaction through
//! the [`ConfigController`], turned into a display list by [`compose`], and
//! written back to the store only when the user asks for it.

pub mod composer;
pub mod controller;
pub mod defaults;
pub mod drag;
pub mod position;
pub mod record;
pub mod store;

pub use composer::{compose, ComposeError, DisplayedWidget, WidgetKey};
pub use controller::{ConfigController, IndicatorState, LayoutAction, SaveConfirmation};
pub use defaults::build_default;
pub use drag::{handle_drag, DragEvent, EventSource};
pub use position::resolve;
pub use record::{Configuration, Offset, PositionData, WidgetRecord};
pub use store::{ConfigStore, FileStore, KeyValueStore, MemoryStore, StoreError, CONFIG_SLOT};
