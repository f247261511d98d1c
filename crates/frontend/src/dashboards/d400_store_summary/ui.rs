use crate::layout::global_context::{AppGlobalContext, Screen};
use crate::shared::api_client::HttpEntityApi;
use crate::shared::components::bar_chart::BarChart;
use crate::shared::components::stat_card::StatCard;
use crate::shared::icons::{icon, kind_icon};
use crate::shared::notifications::use_notifications;
use crate::shared::entity_screen::view_model::Liveness;
use contracts::dashboards::d400_store_summary::{load_store_summary, StoreSummary, TRACKED_KINDS};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Главная панель: счётчики по справочникам и два графика
#[component]
pub fn StoreDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifications = use_notifications();
    let alive = Liveness::new();

    let (summary, set_summary) = signal(None::<StoreSummary>);
    let (loading, set_loading) = signal(false);

    let load = move || {
        let alive = alive.clone();
        set_loading.set(true);
        spawn_local(async move {
            let api = HttpEntityApi::from_config();
            let loaded = load_store_summary(&api).await;
            if !alive.is_alive() {
                return;
            }
            let failed = loaded.failed_kinds();
            if !failed.is_empty() {
                let names: Vec<&str> = failed.iter().map(|kind| kind.list_name()).collect();
                notifications.warning(format!("No se pudieron cargar: {}", names.join(", ")));
            }
            set_summary.set(Some(loaded));
            set_loading.set(false);
        });
    };
    load();

    let cards = TRACKED_KINDS
        .into_iter()
        .map(|kind| {
            let count = move || summary.with(|s| s.as_ref().and_then(|s| s.count(kind).cloned()));
            view! {
                <div class="dashboard__card" on:click=move |_| ctx.open(Screen::Entity(kind))>
                    <StatCard
                        label=kind.list_name()
                        icon_name=kind_icon(kind)
                        value=Signal::derive(move || count().map(|c| c.total))
                        subtitle=Signal::derive(move || count().map(|c| format!("{} activos", c.active)))
                        failed=Signal::derive(move || count().map(|c| c.failed).unwrap_or(false))
                    />
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="page dashboard">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Dashboard"</h1>
                </div>
                <div class="header__actions">
                    <button
                        class="button button--secondary"
                        on:click=move |_| load()
                        disabled=move || loading.get()
                    >
                        {icon("refresh")}
                        "Actualizar"
                    </button>
                </div>
            </div>

            <div class="dashboard__cards">
                {cards}
            </div>

            <div class="dashboard__charts">
                {move || summary.get().map(|s| view! {
                    <BarChart series=s.stock_by_product />
                    <BarChart series=s.supplier_status />
                })}
            </div>
        </div>
    }
}
