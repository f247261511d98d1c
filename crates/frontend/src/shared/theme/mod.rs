//! Светлая и тёмная тема консоли.
//!
//! The choice survives reloads through localStorage and reaches CSS as the
//! `data-theme` attribute of `<body>`.

use crate::shared::icons::icon;
use leptos::prelude::*;
use web_sys::{window, Storage};

const STORAGE_KEY: &str = "tienda-tema";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn code(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Неизвестное значение в хранилище даёт светлую тему
    pub fn from_code(code: &str) -> Self {
        if code == Theme::Dark.code() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn stored() -> Self {
        local_storage()
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten())
            .map(|code| Theme::from_code(&code))
            .unwrap_or_default()
    }

    fn persist(self) {
        if let Some(storage) = local_storage() {
            if storage.set_item(STORAGE_KEY, self.code()).is_err() {
                log::warn!("theme: localStorage write rejected");
            }
        }
    }

    fn apply_to_body(self) {
        let body = window().and_then(|w| w.document()).and_then(|d| d.body());
        if let Some(body) = body {
            let _ = body.set_attribute("data-theme", self.code());
        }
    }
}

fn local_storage() -> Option<Storage> {
    window().and_then(|w| w.local_storage().ok().flatten())
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: RwSignal<Theme>,
}

impl ThemeContext {
    pub fn toggle(&self) {
        self.theme.update(|theme| *theme = theme.toggled());
    }
}

/// Читает сохранённую тему и синхронизирует её с `<body>` и хранилищем
#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let theme = RwSignal::new(Theme::stored());
    Effect::new(move |prev: Option<Theme>| {
        let current = theme.get();
        current.apply_to_body();
        if prev.is_some_and(|prev| prev != current) {
            current.persist();
        }
        current
    });

    provide_context(ThemeContext { theme });
    children()
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not provided")
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ctx = use_theme();
    let is_dark = move || ctx.theme.get() == Theme::Dark;

    view! {
        <button
            class="top-header__icon-btn"
            on:click=move |_| ctx.toggle()
            title=move || if is_dark() { "Modo claro" } else { "Modo oscuro" }
        >
            {move || if is_dark() { icon("sun") } else { icon("moon") }}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_fall_back_to_light() {
        assert_eq!(Theme::from_code("dark"), Theme::Dark);
        assert_eq!(Theme::from_code("forest"), Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::from_code(Theme::Light.code()), Theme::Light);
    }
}
