//! In-memory owner of the widget configuration.
//!
//! The [`ConfigController`] is constructed once per session. It adopts the
//! stored configuration if there is one and the default otherwise, then
//! only changes through [`toggle_selection`](ConfigController::toggle_selection)
//! and [`update_position`](ConfigController::update_position). Nothing is
//! written to the store until [`request_save`](ConfigController::request_save).

use std::time::{Duration, Instant};

use super::defaults::build_default;
use super::record::Configuration;
use super::store::{ConfigStore, StoreError};

/// How long the "saved" confirmation stays visible by default.
pub const DEFAULT_CONFIRMATION_DELAY: Duration = Duration::from_secs(1);

/// A mutation bound to one widget, produced by widget callbacks and the
/// configuration menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutAction {
    /// Flip the widget's `selected` flag.
    ToggleSelection(String),
    /// Pin the widget at a custom offset.
    UpdatePosition {
        /// Widget name.
        name: String,
        /// New horizontal offset.
        x: i32,
        /// New vertical offset.
        y: i32,
    },
}

/// Phase of the save confirmation indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    /// Nothing to show.
    Idle,
    /// A save just happened; the confirmation is visible.
    Confirming,
}

/// Save confirmation that clears itself once its delay has elapsed.
///
/// The indicator keeps a deadline rather than a flag, so returning to
/// [`IndicatorState::Idle`] needs no external trigger. A new save pushes
/// the deadline out again.
#[derive(Debug, Clone)]
pub struct SaveConfirmation {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SaveConfirmation {
    /// Creates an idle indicator with the given display delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Enters `Confirming` at `now`, restarting the delay.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// State as observed at `now`.
    pub fn state(&self, now: Instant) -> IndicatorState {
        match self.deadline {
            Some(deadline) if now < deadline => IndicatorState::Confirming,
            _ => IndicatorState::Idle,
        }
    }

    /// Drops an elapsed deadline. Returns `true` if the indicator just went idle.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for SaveConfirmation {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRMATION_DELAY)
    }
}

/// Returns a copy of `config` with `name`'s selection flipped, or `None`
/// if no record has that name.
pub fn with_selection_toggled(config: &Configuration, name: &str) -> Option<Configuration> {
    if !config.contains(name) {
        return None;
    }
    Some(config.map_records(|record| {
        let mut next = record.clone();
        if next.name == name {
            next.selected = !next.selected;
        }
        next
    }))
}

/// Returns a copy of `config` with `name` pinned at `(x, y)`, or `None` if
/// no record has that name. The record keeps its `gridArea`.
pub fn with_position(config: &Configuration, name: &str, x: i32, y: i32) -> Option<Configuration> {
    if !config.contains(name) {
        return None;
    }
    Some(config.map_records(|record| {
        let mut next = record.clone();
        if next.name == name {
            next.position_data.custom_position = true;
            next.position_data.x = x;
            next.position_data.y = y;
        }
        next
    }))
}

/// Source of truth for the session's widget configuration.
#[derive(Debug)]
pub struct ConfigController {
    config: Configuration,
    store: ConfigStore,
    confirmation: SaveConfirmation,
}

impl ConfigController {
    /// Builds the controller, reading the store exactly once.
    ///
    /// Adopts the stored configuration verbatim when present, otherwise a
    /// fresh default. A malformed stored value is returned as an error.
    pub fn new(store: ConfigStore, confirmation_delay: Duration) -> Result<Self, StoreError> {
        let config = match store.load()? {
            Some(stored) => {
                tracing::info!(widgets = stored.len(), "restored stored widget configuration");
                stored
            }
            None => {
                tracing::info!("no stored widget configuration, using defaults");
                build_default()
            }
        };
        Ok(Self {
            config,
            store,
            confirmation: SaveConfirmation::new(confirmation_delay),
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Flips `selected` on the named widget. Unknown names are ignored.
    pub fn toggle_selection(&mut self, name: &str) {
        match with_selection_toggled(&self.config, name) {
            Some(next) => self.config = next,
            None => tracing::debug!(name, "toggle ignored: no such widget"),
        }
    }

    /// Pins the named widget at `(x, y)`. Unknown names are ignored.
    pub fn update_position(&mut self, name: &str, x: i32, y: i32) {
        match with_position(&self.config, name, x, y) {
            Some(next) => self.config = next,
            None => tracing::debug!(name, "position update ignored: no such widget"),
        }
    }

    /// Applies a bound widget or menu action.
    pub fn apply(&mut self, action: LayoutAction) {
        match action {
            LayoutAction::ToggleSelection(name) => self.toggle_selection(&name),
            LayoutAction::UpdatePosition { name, x, y } => self.update_position(&name, x, y),
        }
    }

    /// Replaces the in-memory configuration with a fresh default.
    ///
    /// The store keeps its value until the next save.
    pub fn reset_to_default(&mut self) {
        self.config = build_default();
    }

    /// Writes the current configuration to the store and shows the
    /// confirmation.
    pub fn request_save(&mut self) -> Result<(), StoreError> {
        self.request_save_at(Instant::now())
    }

    /// [`request_save`](Self::request_save) with an explicit clock.
    pub fn request_save_at(&mut self, now: Instant) -> Result<(), StoreError> {
        self.store.save(&self.config)?;
        self.confirmation.trigger(now);
        Ok(())
    }

    /// Whether the save confirmation is currently visible.
    pub fn save_requested(&self) -> bool {
        self.confirmation_state(Instant::now()) == IndicatorState::Confirming
    }

    /// Confirmation state at `now`.
    pub fn confirmation_state(&self, now: Instant) -> IndicatorState {
        self.confirmation.state(now)
    }

    /// Clears an elapsed confirmation. Returns `true` if it just went idle.
    pub fn expire_confirmation(&mut self, now: Instant) -> bool {
        self.confirmation.expire(now)
    }

    /// Whether the store can persist anything.
    pub fn persistence_available(&self) -> bool {
        self.store.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::position::resolve;
    use crate::layout::record::Offset;
    use crate::layout::store::{KeyValueStore, MemoryStore, CONFIG_SLOT};

    const STORED: &str = r#"[{"name":"Clock","selected":true,"positionData":{"gridArea":"a","customPosition":true,"x":120,"y":40}},{"name":"News","selected":false,"positionData":{"gridArea":"b","customPosition":false,"x":0,"y":0}}]"#;

    fn fresh_controller() -> ConfigController {
        ConfigController::new(ConfigStore::new(MemoryStore::new()), DEFAULT_CONFIRMATION_DELAY)
            .expect("empty store initializes")
    }

    // -- initialization --

    #[test]
    fn empty_store_initializes_default() {
        let controller = fresh_controller();
        assert_eq!(controller.config(), &build_default());
        assert!(controller
            .config()
            .records()
            .iter()
            .all(|r| !r.selected && !r.position_data.custom_position));
    }

    #[test]
    fn unavailable_store_initializes_default() {
        let controller =
            ConfigController::new(ConfigStore::unavailable(), DEFAULT_CONFIRMATION_DELAY)
                .expect("init");
        assert_eq!(controller.config(), &build_default());
        assert!(!controller.persistence_available());
    }

    #[test]
    fn stored_configuration_is_restored_verbatim() {
        let store = ConfigStore::new(MemoryStore::with_entry(CONFIG_SLOT, STORED));
        let controller = ConfigController::new(store, DEFAULT_CONFIRMATION_DELAY).expect("init");
        let config = controller.config();
        assert_eq!(config.len(), 2);
        let clock = config.get("Clock").expect("clock record");
        assert!(clock.selected);
        assert_eq!(resolve(clock), Some(Offset { x: 120, y: 40 }));
    }

    #[test]
    fn malformed_store_fails_initialization() {
        let store = ConfigStore::new(MemoryStore::with_entry(CONFIG_SLOT, "[{\"name\":"));
        let result = ConfigController::new(store, DEFAULT_CONFIRMATION_DELAY);
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn mutations_do_not_touch_the_store() {
        let backend = MemoryStore::new();
        let mut controller =
            ConfigController::new(ConfigStore::new(backend.clone()), DEFAULT_CONFIRMATION_DELAY)
                .expect("init");
        controller.toggle_selection("Clock");
        controller.update_position("Clock", 3, 4);
        assert!(backend.get(CONFIG_SLOT).expect("get").is_none());
    }

    // -- toggle_selection --

    #[test]
    fn toggle_twice_restores_original() {
        let mut controller = fresh_controller();
        let original = controller.config().clone();
        controller.toggle_selection("Quote");
        assert!(controller.config().get("Quote").expect("quote").selected);
        controller.toggle_selection("Quote");
        assert_eq!(controller.config(), &original);
    }

    #[test]
    fn toggle_leaves_other_records_unchanged() {
        let mut controller = fresh_controller();
        let before = controller.config().clone();
        controller.toggle_selection("Stocks");
        for (old, new) in before.records().iter().zip(controller.config().records()) {
            if old.name == "Stocks" {
                assert_ne!(old.selected, new.selected);
                assert_eq!(old.position_data, new.position_data);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn toggle_unknown_name_is_noop() {
        let mut controller = fresh_controller();
        let before = controller.config().clone();
        controller.toggle_selection("Calendar");
        assert_eq!(controller.config(), &before);
    }

    #[test]
    fn pure_toggle_does_not_modify_input() {
        let config = build_default();
        let next = with_selection_toggled(&config, "Clock").expect("clock exists");
        assert!(!config.get("Clock").expect("clock").selected);
        assert!(next.get("Clock").expect("clock").selected);
        assert!(with_selection_toggled(&config, "nope").is_none());
    }

    // -- update_position --

    #[test]
    fn update_position_sets_custom_offset_and_keeps_grid_area() {
        let mut controller = fresh_controller();
        controller.update_position("Weather", 15, 6);
        let weather = controller.config().get("Weather").expect("weather");
        assert!(weather.position_data.custom_position);
        assert_eq!(weather.position_data.grid_area, "f");
        assert_eq!(resolve(weather), Some(Offset { x: 15, y: 6 }));
    }

    #[test]
    fn update_position_leaves_other_records_unchanged() {
        let mut controller = fresh_controller();
        controller.update_position("News", 1, 2);
        for record in controller.config().records() {
            if record.name != "News" {
                assert_eq!(resolve(record), None);
            }
        }
    }

    #[test]
    fn update_position_unknown_name_is_noop() {
        let mut controller = fresh_controller();
        controller.update_position("Calendar", 1, 2);
        assert_eq!(controller.config(), &build_default());
    }

    #[test]
    fn apply_dispatches_actions() {
        let mut controller = fresh_controller();
        controller.apply(LayoutAction::ToggleSelection("ToDo".to_string()));
        controller.apply(LayoutAction::UpdatePosition {
            name: "ToDo".to_string(),
            x: 9,
            y: 3,
        });
        let todo = controller.config().get("ToDo").expect("todo");
        assert!(todo.selected);
        assert_eq!(resolve(todo), Some(Offset { x: 9, y: 3 }));
    }

    #[test]
    fn reset_to_default_discards_changes() {
        let mut controller = fresh_controller();
        controller.toggle_selection("Clock");
        controller.update_position("Clock", 5, 5);
        controller.reset_to_default();
        assert_eq!(controller.config(), &build_default());
    }

    // -- request_save / confirmation --

    #[test]
    fn request_save_persists_whole_configuration() {
        let backend = MemoryStore::new();
        let mut controller =
            ConfigController::new(ConfigStore::new(backend.clone()), DEFAULT_CONFIRMATION_DELAY)
                .expect("init");
        controller.toggle_selection("Clock");
        controller.request_save().expect("save");

        let reloaded = ConfigController::new(ConfigStore::new(backend), DEFAULT_CONFIRMATION_DELAY)
            .expect("reload");
        assert_eq!(reloaded.config(), controller.config());
        assert!(controller.save_requested());
    }

    #[test]
    fn confirmation_goes_idle_after_delay() {
        let mut controller = fresh_controller();
        let t0 = Instant::now();
        assert_eq!(controller.confirmation_state(t0), IndicatorState::Idle);

        controller.request_save_at(t0).expect("save");
        assert_eq!(controller.confirmation_state(t0), IndicatorState::Confirming);
        assert_eq!(
            controller.confirmation_state(t0 + Duration::from_millis(999)),
            IndicatorState::Confirming
        );
        assert_eq!(
            controller.confirmation_state(t0 + DEFAULT_CONFIRMATION_DELAY),
            IndicatorState::Idle
        );
    }

    #[test]
    fn second_save_restarts_delay() {
        let mut controller = fresh_controller();
        let t0 = Instant::now();
        controller.request_save_at(t0).expect("save");
        let t1 = t0 + Duration::from_millis(800);
        controller.request_save_at(t1).expect("save again");
        assert_eq!(
            controller.confirmation_state(t0 + Duration::from_millis(1500)),
            IndicatorState::Confirming
        );
        assert_eq!(
            controller.confirmation_state(t1 + DEFAULT_CONFIRMATION_DELAY),
            IndicatorState::Idle
        );
    }

    #[test]
    fn expire_reports_transition_once() {
        let mut indicator = SaveConfirmation::new(Duration::from_millis(10));
        let t0 = Instant::now();
        assert!(!indicator.expire(t0));
        indicator.trigger(t0);
        assert!(!indicator.expire(t0 + Duration::from_millis(5)));
        assert!(indicator.expire(t0 + Duration::from_millis(10)));
        assert!(!indicator.expire(t0 + Duration::from_millis(20)));
        assert_eq!(indicator.state(t0), IndicatorState::Idle);
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> std::io::Result<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> std::io::Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            ))
        }
        fn remove(&self, _key: &str) -> std::io::Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn failed_save_does_not_confirm() {
        let mut controller =
            ConfigController::new(ConfigStore::new(ReadOnlyStore), DEFAULT_CONFIRMATION_DELAY)
                .expect("init");
        let now = Instant::now();
        assert!(matches!(
            controller.request_save_at(now),
            Err(StoreError::Write { .. })
        ));
        assert_eq!(controller.confirmation_state(now), IndicatorState::Idle);
    }
}
