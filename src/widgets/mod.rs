//! Widget kinds shown on the dashboard.
//!
//! This module defines the `Widget` trait that all dashboard widgets
//! implement, and the `WidgetRegistry` that maps configuration names to
//! widget factories.
//!
//! # Architecture
//!
//! Each widget renders a few lines of body text into its tile. The tile
//! frame, title bar and placement are handled by the TUI; widgets only see
//! the inner width and a shared `WidgetContext`.
//!
//! # Example
//!
//! ```
//! use tile_dashboard::widgets::{WidgetContext, WidgetRegistry};
//!
//! let registry = WidgetRegistry::new();
//! let widget = registry.create("Clock").expect("clock widget exists");
//! let ctx = WidgetContext::new(chrono::Local::now(), 0);
//! let lines = widget.render(20, &ctx);
//! assert!(!lines.is_empty());
//! ```

pub mod clock;
pub mod context;
pub mod news;
pub mod quote;
pub mod stocks;
pub mod todo;
pub mod weather;

pub use context::WidgetContext;

use ratatui::text::Line;
use std::collections::HashMap;

/// Trait for dashboard widgets.
///
/// Widgets must be thread-safe (`Send + Sync`) so the registry and its
/// products can live anywhere in the application.
pub trait Widget: Send + Sync {
    /// Render the widget body.
    ///
    /// # Arguments
    ///
    /// * `width` - Inner tile width in columns.
    /// * `context` - Shared state for rendering.
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>>;

    /// Widget-kind name, matching the configuration record's `name`.
    fn id(&self) -> &'static str;
}

/// Factory function type for creating widget instances.
pub type WidgetFactory = fn() -> Box<dyn Widget>;

/// Registry mapping widget-kind names to factory functions.
///
/// # Example
///
/// ```
/// use tile_dashboard::widgets::WidgetRegistry;
///
/// let registry = WidgetRegistry::new();
/// assert!(registry.create("Weather").is_some());
/// assert!(registry.create("Calendar").is_none());
/// ```
pub struct WidgetRegistry {
    factories: HashMap<&'static str, WidgetFactory>,
}

impl WidgetRegistry {
    /// Creates a registry with the built-in widget kinds:
    /// `Clock`, `News`, `Quote`, `Stocks`, `ToDo`, `Weather`.
    pub fn new() -> Self {
        let mut reg = Self {
            factories: HashMap::new(),
        };
        reg.register(clock::NAME, clock::create);
        reg.register(news::NAME, news::create);
        reg.register(quote::NAME, quote::create);
        reg.register(stocks::NAME, stocks::create);
        reg.register(todo::NAME, todo::create);
        reg.register(weather::NAME, weather::create);
        reg
    }

    /// Register a widget factory for the given name.
    ///
    /// Overwrites any existing factory for the same name.
    pub fn register(&mut self, id: &'static str, factory: WidgetFactory) {
        self.factories.insert(id, factory);
    }

    /// Create a widget instance by name.
    ///
    /// Returns `None` if no factory is registered for the given name.
    pub fn create(&self, id: &str) -> Option<Box<dyn Widget>> {
        self.factories.get(id).map(|f| f())
    }

    /// List all registered names, sorted.
    pub fn available_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.factories.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Cuts `text` to at most `width` characters, ending with `…` when shortened.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::defaults::BASELINE;

    struct MockWidget;

    impl Widget for MockWidget {
        fn render(&self, width: u16, _context: &WidgetContext) -> Vec<Line<'static>> {
            vec![Line::raw(format!("mock:{width}"))]
        }
        fn id(&self) -> &'static str {
            "mock"
        }
    }

    fn ctx() -> WidgetContext {
        WidgetContext::new(chrono::Local::now(), 0)
    }

    #[test]
    fn test_registry_covers_every_baseline_widget() {
        let reg = WidgetRegistry::new();
        for (name, _) in BASELINE {
            let widget = reg.create(name);
            assert!(widget.is_some(), "expected factory for '{name}'");
            assert_eq!(widget.expect("already checked").id(), *name);
        }
    }

    #[test]
    fn test_registry_returns_none_for_unknown() {
        let reg = WidgetRegistry::new();
        assert!(reg.create("Calendar").is_none());
        assert!(reg.create("clock").is_none());
        assert!(reg.create("").is_none());
    }

    #[test]
    fn test_registry_available_ids_sorted() {
        let reg = WidgetRegistry::new();
        assert_eq!(
            reg.available_ids(),
            vec!["Clock", "News", "Quote", "Stocks", "ToDo", "Weather"]
        );
    }

    #[test]
    fn test_registry_register_custom_widget() {
        let mut reg = WidgetRegistry::new();
        fn custom_factory() -> Box<dyn Widget> {
            Box::new(MockWidget)
        }
        reg.register("mock", custom_factory);
        assert!(reg.available_ids().contains(&"mock"));
        let w = reg.create("mock").expect("custom widget registered");
        assert_eq!(w.render(12, &ctx())[0].to_string(), "mock:12");
    }

    #[test]
    fn test_every_widget_renders_within_width() {
        let reg = WidgetRegistry::new();
        let context = ctx();
        for id in reg.available_ids() {
            let widget = reg.create(id).expect("registered");
            for line in widget.render(16, &context) {
                assert!(
                    line.width() <= 16,
                    "{id} rendered a line wider than 16: {:?}",
                    line.to_string()
                );
            }
        }
    }

    #[test]
    fn test_widget_trait_object_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Widget>();
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 6), "hello…");
        assert_eq!(truncate("hello", 0), "");
    }
}
