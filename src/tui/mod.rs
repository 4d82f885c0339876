//! Terminal front end for the dashboard.
//!
//! Built on ratatui and crossterm. Widgets are tiles in a 3x2 grid that can
//! be dragged with the mouse; the bottom bar is the configuration menu.

pub mod app;
pub mod event;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
