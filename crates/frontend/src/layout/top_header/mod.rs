//! Верхняя панель: название, переключатели и пользователь

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::theme::ThemeToggle;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                {icon("music")}
                <span class="top-header__title">"Tienda Música"</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {icon("panel-left")}
                </button>

                <ThemeToggle />

                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth.user.get()
                            .map(|u| u.display_name().to_string())
                            .unwrap_or_default()}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=move |_| auth.logout() title="Cerrar sesión">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
