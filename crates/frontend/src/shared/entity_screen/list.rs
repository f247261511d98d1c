use super::details::entity_form_dialog;
use super::view_model::EntityListViewModel;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::{icon, kind_icon};
use crate::shared::list_utils::{SearchInput, SortSelect, StatusFilterSelect};
use crate::shared::notifications::use_notifications;
use contracts::domain::common::{cell_text, CatalogEntity, CellSource};
use leptos::prelude::*;

/// Экран списка для любого типа сущности: поиск, фильтр, сортировка,
/// страницы, форма создания/редактирования, статус и удаление.
pub fn entity_list<E: CatalogEntity>() -> impl IntoView {
    let vm = EntityListViewModel::<E>::new(use_notifications());
    let visible = vm.visible_page();
    let capabilities = E::KIND.capabilities();
    let column_count = (E::columns().len() + 1).to_string();

    let items = vm.items;
    let names = vm.names;
    let loading = vm.loading;
    let error = vm.error;
    let search = vm.search;
    let page = vm.page;
    let busy = vm.busy;

    vm.reload();

    let create_vm = vm.clone();
    let refresh_vm = vm.clone();
    let rows_vm = vm.clone();

    let rows = move || {
        if loading.get() && items.with(Vec::is_empty) {
            return view! {
                <tr><td class="table__cell table__cell--empty" colspan=column_count.clone()>"Cargando..."</td></tr>
            }
            .into_any();
        }
        let current = visible.get();
        if current.items.is_empty() {
            return view! {
                <tr><td class="table__cell table__cell--empty" colspan=column_count.clone()>"No hay registros"</td></tr>
            }
            .into_any();
        }
        let names = names.get();
        current
            .items
            .into_iter()
            .map(|item| {
                let cells = E::columns()
                    .iter()
                    .map(|column| {
                        let text = match column.cell {
                            CellSource::ModifiedAt => format_datetime(item.modified_at().unwrap_or_default()),
                            cell => cell_text(&item, cell, &names),
                        };
                        let class = match column.cell {
                            CellSource::Status if item.status().is_active() => "table__cell status status--active",
                            CellSource::Status => "table__cell status status--inactive",
                            _ => "table__cell",
                        };
                        view! { <td class=class>{text}</td> }
                    })
                    .collect_view();

                let edit_vm = rows_vm.clone();
                let edit_item = item.clone();
                let toggle = capabilities.status_toggle.then(|| {
                    let vm = rows_vm.clone();
                    let item = item.clone();
                    let title = if item.status().is_active() { "Desactivar" } else { "Activar" };
                    view! {
                        <button
                            class="button button--icon"
                            title=title
                            disabled=move || busy.get()
                            on:click=move |_| vm.toggle_status(item.clone())
                        >
                            {icon("power")}
                        </button>
                    }
                });
                let delete = capabilities.delete.then(|| {
                    let vm = rows_vm.clone();
                    let item = item.clone();
                    view! {
                        <button
                            class="button button--icon button--danger"
                            title="Eliminar"
                            disabled=move || busy.get()
                            on:click=move |_| vm.delete(item.clone())
                        >
                            {icon("delete")}
                        </button>
                    }
                });

                view! {
                    <tr class="table__row" class:table__row--inactive=!item.status().is_active()>
                        {cells}
                        <td class="table__cell table__cell--actions">
                            <button
                                class="button button--icon"
                                title="Editar"
                                on:click=move |_| edit_vm.open_edit(edit_item.clone())
                            >
                                {icon("edit")}
                            </button>
                            {toggle}
                            {delete}
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="page">
            <PageHeader
                title=E::KIND.list_name()
                icon_name=kind_icon(E::KIND)
                subtitle=Signal::derive(move || Some(format!("{} registros", items.with(Vec::len))))
            >
                <button class="button button--primary" on:click=move |_| create_vm.open_create()>
                    {icon("plus")}
                    {format!("Agregar {}", E::KIND.title())}
                </button>
                <button
                    class="button button--secondary"
                    on:click=move |_| refresh_vm.reload()
                    disabled=move || loading.get()
                >
                    {icon("refresh")}
                    "Actualizar"
                </button>
            </PageHeader>

            <div class="list-toolbar">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |text: String| search.set(text))
                />
                <StatusFilterSelect value=vm.status />
                <SortSelect options=E::sort_options() value=vm.sort_key />
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            {E::columns().iter().map(|column| view! {
                                <th class="table__header-cell">{column.title}</th>
                            }).collect_view()}
                            <th class="table__header-cell table__header-cell--actions">"Acciones"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {rows}
                    </tbody>
                </table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || visible.with(|p| p.page_number))
                total_pages=Signal::derive(move || visible.with(|p| p.total_pages))
                total_count=Signal::derive(move || visible.with(|p| p.total_count))
                on_page_change=Callback::new(move |n: usize| page.set(n))
            />

            {entity_form_dialog(vm)}
        </div>
    }
}
