pub(crate) use super::*;
use crate::layout::controller::DEFAULT_CONFIRMATION_DELAY;
use crate::layout::{ConfigStore, MemoryStore};


pub(crate) fn make_app_with_store(store: ConfigStore) -> App {
    let controller =
        ConfigController::new(store, DEFAULT_CONFIRMATION_DELAY).expect("controller init");
    App::new(controller, WidgetRegistry::new(), Duration::from_millis(250))
}

pub(crate) fn make_app() -> App {
    make_app_with_store(ConfigStore::new(MemoryStore::new()))
}
