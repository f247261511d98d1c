use crate::shared::icons::icon;
use leptos::prelude::*;

/// Заголовок экрана списка: иконка, название, счётчик и кнопки действий
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,

    /// Icon name from the icon() helper
    icon_name: &'static str,

    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    /// Action buttons
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__content">
                <div class="page-header__icon">{icon(icon_name)}</div>
                <div class="page-header__text">
                    <h1 class="page-header__title">{title}</h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page-header__subtitle">{s}</div>
                    })}
                </div>
            </div>
            <div class="page-header__actions">
                {children()}
            </div>
        </div>
    }
}
