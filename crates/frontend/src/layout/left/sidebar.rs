//! Боковое меню: главная панель и по пункту на каждый справочник

use crate::layout::global_context::{AppGlobalContext, Screen};
use crate::shared::icons::{icon, kind_icon};
use contracts::domain::common::EntityKind;
use leptos::prelude::*;

fn menu_items() -> Vec<(Screen, &'static str)> {
    let mut items = vec![(Screen::Dashboard, "dashboard")];
    items.extend(
        EntityKind::all()
            .into_iter()
            .map(|kind| (Screen::Entity(kind), kind_icon(kind))),
    );
    items
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-sidebar__content">
            {menu_items().into_iter().map(|(screen, icon_name)| view! {
                <div
                    class="app-sidebar__item"
                    class:app-sidebar__item--active=move || ctx.active.get() == screen
                    on:click=move |_| ctx.open(screen)
                >
                    <div class="app-sidebar__item-content">
                        {icon(icon_name)}
                        <span>{screen.title()}</span>
                    </div>
                </div>
            }).collect_view()}
        </div>
    }
}
