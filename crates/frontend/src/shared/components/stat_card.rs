use crate::shared::icons::icon;
use leptos::prelude::*;

/// Карточка счётчика на главной панели
#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// None while loading
    #[prop(into)]
    value: Signal<Option<usize>>,
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,
    /// The read behind this card failed
    #[prop(optional, into)]
    failed: MaybeProp<bool>,
) -> impl IntoView {
    let status_class = move || {
        if failed.get().unwrap_or(false) {
            "stat-card stat-card--error"
        } else {
            "stat-card"
        }
    };

    let formatted = move || match value.get() {
        Some(v) => v.to_string(),
        None => "…".to_string(),
    };

    view! {
        <div class=status_class>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}
