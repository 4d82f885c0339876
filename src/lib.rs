//! Personal dashboard of draggable widget tiles.
//!
//! The core is the widget configuration model in [`layout`]: an ordered list
//! of widget records (selected or not, grid slot, optional custom offset)
//! owned by a [`layout::ConfigController`], persisted on demand to a
//! key-value slot, and turned into a display list by [`layout::compose`].
//!
//! Around it sit the widget kinds ([`widgets`]), a ratatui front end
//! ([`tui`]), TOML settings ([`config`]) and tracing setup ([`logging`]).

pub mod config;
pub mod layout;
pub mod logging;
pub mod tui;
pub mod widgets;
