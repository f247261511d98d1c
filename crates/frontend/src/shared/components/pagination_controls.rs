use crate::shared::icons::icon;
use contracts::shared::list_query::page_window;
use leptos::prelude::*;

/// PaginationControls component - pages are numbered from 1
///
/// Shows previous/next buttons and up to three page numbers around the
/// current page.
#[component]
pub fn PaginationControls(
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)]
    total_pages: Signal<usize>,

    #[prop(into)]
    total_count: Signal<usize>,

    on_page_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || current_page.get() <= 1
                title="Anterior"
            >
                {icon("chevron-left")}
            </button>
            {move || {
                let current = current_page.get();
                page_window(current, total_pages.get()).into_iter().map(|page| view! {
                    <button
                        class="pagination-btn"
                        class:pagination-btn--active=page == current
                        on:click=move |_| on_page_change.run(page)
                    >
                        {page.to_string()}
                    </button>
                }).collect_view()
            }}
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || current_page.get() >= total_pages.get()
                title="Siguiente"
            >
                {icon("chevron-right")}
            </button>
            <span class="pagination-info">
                {move || format!("{} / {} ({})", current_page.get(), total_pages.get().max(1), total_count.get())}
            </span>
        </div>
    }
}
