use crate::dashboards::d400_store_summary::ui::StoreDashboard;
use crate::domain::screen_view;
use crate::layout::global_context::{AppGlobalContext, Screen};
use leptos::prelude::*;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-content" style="flex: 1; overflow: auto;">
            {children()}
        </div>
    }
}

/// Активный экран; при переключении старый экран размонтируется
#[component]
pub fn ActiveScreen() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    move || match ctx.active.get() {
        Screen::Dashboard => view! { <StoreDashboard /> }.into_any(),
        Screen::Entity(kind) => screen_view(kind),
    }
}
