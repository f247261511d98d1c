/// Элементы управления списком: поиск, фильтр статуса, сортировка
use contracts::domain::common::StatusFilter;
use contracts::shared::list_query::SortOption;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DEBOUNCE_MS: u32 = 300;

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    // Only the latest keystroke fires after the pause.
    let generation = StoredValue::new(0u64);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let current = generation.get_value() + 1;
        generation.set_value(current);
        spawn_local(async move {
            TimeoutFuture::new(DEBOUNCE_MS).await;
            if generation.try_get_value() == Some(current) {
                on_change.run(new_value);
            }
        });
    };

    let clear_filter = move |_| {
        generation.update_value(|g| *g += 1);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" class:search-input--active=move || !value.get().is_empty()>
            <input
                type="text"
                class="search-input__field"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Limpiar">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Выбор "Mostrar todos / Activos / Inactivos"
#[component]
pub fn StatusFilterSelect(value: RwSignal<StatusFilter>) -> impl IntoView {
    view! {
        <select
            class="list-select"
            prop:value=move || value.get().as_key()
            on:change=move |ev| value.set(StatusFilter::from_key(&event_target_value(&ev)))
        >
            {StatusFilter::all().into_iter().map(|filter| view! {
                <option value=filter.as_key()>{filter.label()}</option>
            }).collect_view()}
        </select>
    }
}

/// Меню сортировки; пустой ключ означает порядок с сервера
#[component]
pub fn SortSelect(
    options: &'static [SortOption],
    value: RwSignal<Option<&'static str>>,
) -> impl IntoView {
    view! {
        <select
            class="list-select"
            prop:value=move || value.get().unwrap_or("")
            on:change=move |ev| {
                let key = event_target_value(&ev);
                value.set(options.iter().find(|o| o.key == key).map(|o| o.key));
            }
        >
            <option value="">"Ordenar"</option>
            {options.iter().map(|option| view! {
                <option value=option.key>{option.label}</option>
            }).collect_view()}
        </select>
    }
}

/// Найти опцию сортировки по ключу
pub fn sort_option(options: &'static [SortOption], key: Option<&str>) -> Option<&'static SortOption> {
    key.and_then(|key| options.iter().find(|o| o.key == key))
}
