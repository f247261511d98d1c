use contracts::domain::common::EntityKind;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Экран в центральной области
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    Entity(EntityKind),
}

impl Screen {
    pub fn key(&self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard",
            Screen::Entity(kind) => kind.key(),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        if key == "dashboard" {
            return Some(Screen::Dashboard);
        }
        EntityKind::from_key(key).map(Screen::Entity)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Entity(kind) => kind.list_name(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Screen>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Screen::Dashboard),
            left_open: RwSignal::new(true),
        }
    }

    /// Читает `?active=` при старте и дальше держит его в адресной строке
    pub fn init_router_integration(&self) {
        if let Some(screen) = screen_from_location() {
            self.open(screen);
        }
        let active = self.active;
        Effect::new(move |_| write_screen_to_location(active.get()));
    }

    pub fn open(&self, screen: Screen) {
        log::debug!("open screen '{}'", screen.key());
        self.active.set(screen);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }
}

fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn screen_from_location() -> Option<Screen> {
    let search = current_search();
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").and_then(|key| Screen::from_key(key))
}

fn write_screen_to_location(screen: Screen) {
    let query = serde_qs::to_string(&HashMap::from([("active", screen.key())])).unwrap_or_default();
    let url = format!("?{query}");
    if current_search() == url {
        return;
    }
    let history = window().and_then(|w| w.history().ok());
    if let Some(history) = history {
        if history
            .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
            .is_err()
        {
            log::warn!("could not update address bar to {url}");
        }
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_keys_round_trip() {
        assert_eq!(Screen::from_key("dashboard"), Some(Screen::Dashboard));
        for kind in EntityKind::all() {
            let screen = Screen::Entity(kind);
            assert_eq!(Screen::from_key(screen.key()), Some(screen));
        }
        assert_eq!(Screen::from_key("nomenclatura"), None);
    }
}
