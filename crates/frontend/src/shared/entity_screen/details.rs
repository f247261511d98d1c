use super::view_model::{load_reference_rows, EntityListViewModel, Liveness, MutationOutcome};
use crate::shared::api_client::HttpEntityApi;
use contracts::domain::common::{CatalogEntity, EntityKind, RecordStatus};
use contracts::shared::form::{submit, FieldDef, FieldKind, FormMode, FormValues, ReferenceOptions};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Диалог формы; монтируется заново при каждом открытии
pub fn entity_form_dialog<E: CatalogEntity>(vm: EntityListViewModel<E>) -> impl IntoView {
    let editing = vm.editing;
    move || {
        editing
            .get()
            .map(|original| form_dialog(vm.clone(), original))
    }
}

fn form_dialog<E: CatalogEntity>(vm: EntityListViewModel<E>, original: Option<E>) -> impl IntoView {
    let alive = Liveness::new();
    let is_edit = original.is_some();
    let title = if is_edit {
        format!("Editar {}", E::KIND.title())
    } else {
        format!("Agregar {}", E::KIND.title())
    };

    let open = RwSignal::new(true);
    let values = RwSignal::new(match &original {
        Some(item) => FormValues::from_entity(item),
        None => FormValues::for_create::<E>(),
    });
    let options = RwSignal::new(ReferenceOptions::new());
    let saving = RwSignal::new(false);
    let form_error = RwSignal::new(None::<String>);
    let original = StoredValue::new(original);

    // закрытие по маске или Escape тоже закрывает форму
    let editing = vm.editing;
    Effect::new(move |_| {
        if !open.get() {
            editing.set(None);
        }
    });

    let reference_kinds: Vec<EntityKind> = E::form_fields()
        .iter()
        .filter_map(|field| match field.kind {
            FieldKind::Reference(kind) => Some(kind),
            _ => None,
        })
        .collect();
    if !reference_kinds.is_empty() {
        let alive = alive.clone();
        let notifications = vm.notifications;
        spawn_local(async move {
            let api = HttpEntityApi::from_config();
            let loaded = load_reference_rows(&api, &reference_kinds).await;
            if !alive.is_alive() {
                return;
            }
            let mut collected = ReferenceOptions::new();
            for (kind, rows) in loaded {
                match rows {
                    Ok(rows) => collected.insert_rows(kind, &rows),
                    Err(e) => {
                        log::error!("{}: options for {kind} failed: {e}", E::KIND);
                        notifications.error(format!("No se pudieron cargar {}: {e}", kind.list_name().to_lowercase()));
                    }
                }
            }
            options.set(collected);
        });
    }

    let on_submit = move |_| {
        if saving.get_untracked() {
            return;
        }
        saving.set(true);
        form_error.set(None);

        let vm = vm.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let api = HttpEntityApi::from_config();
            let current = values.get_untracked();
            let choices = options.get_untracked();
            let existing = vm.items.get_untracked();
            let original = original.get_value();
            let mode = match &original {
                Some(item) => FormMode::Edit(item),
                None => FormMode::Create,
            };
            let notifications = vm.notifications;

            let result = submit(&api, &current, mode, &existing, &choices, |saved: &E| {
                notifications.success(format!(
                    "Se guardó {} \"{}\".",
                    E::KIND.element_name(),
                    saved.display_name()
                ));
            })
            .await;

            match result {
                Ok(_) => {
                    vm.refresh().await;
                    if alive.is_alive() {
                        open.set(false);
                    }
                }
                Err(e) => {
                    if !alive.is_alive() {
                        return;
                    }
                    if !e.is_validation() {
                        log::error!("{}: save failed: {e}", E::KIND);
                    }
                    form_error.set(Some(e.to_string()));
                    if let Some((level, message)) = MutationOutcome::from(&e).failure_toast() {
                        notifications.notify(level, message);
                    }
                    saving.set(false);
                }
            }
        });
    };

    let fields = E::form_fields()
        .iter()
        .map(|field| field_view(*field, values, options, is_edit))
        .collect_view();

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{title}</DialogTitle>
                    <DialogContent>
                        {move || form_error.get().map(|e| view! { <div class="error-message">{e}</div> })}
                        <div class="details-form">
                            {fields}
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=saving
                            on_click=on_submit
                        >
                            {move || if saving.get() { "Guardando..." } else { "Guardar" }}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| open.set(false)
                        >
                            "Cancelar"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

fn field_view(
    field: FieldDef,
    values: RwSignal<FormValues>,
    options: RwSignal<ReferenceOptions>,
    is_edit: bool,
) -> AnyView {
    let key = field.key;
    let current = move || values.with(|v| v.get(key).to_string());
    let on_input = move |ev: leptos::ev::Event| values.update(|v| v.set(key, event_target_value(&ev)));

    let control = match field.kind {
        FieldKind::Id => view! {
            <input type="text" id=key prop:value=current on:input=on_input disabled=is_edit />
        }
        .into_any(),
        FieldKind::Text => view! {
            <input type="text" id=key prop:value=current on:input=on_input />
        }
        .into_any(),
        FieldKind::Number { integer } => view! {
            <input
                type="number"
                id=key
                min="0"
                step={if integer { "1" } else { "0.01" }}
                prop:value=current
                on:input=on_input
            />
        }
        .into_any(),
        FieldKind::Reference(kind) => {
            let placeholder = if field.required { "Seleccione..." } else { "Ninguno" };
            view! {
                <select id=key on:change=on_input>
                    <option value="">{placeholder}</option>
                    {move || reference_choices(kind, &current(), options)}
                </select>
            }
            .into_any()
        }
        FieldKind::Status => view! {
            <select id=key on:change=on_input>
                {[RecordStatus::Active, RecordStatus::Inactive].into_iter().map(|status| view! {
                    <option
                        value=status.as_code()
                        selected=move || current() == status.as_code()
                    >
                        {status.label()}
                    </option>
                }).collect_view()}
            </select>
        }
        .into_any(),
    };

    view! {
        <div class="form-group">
            <label for=key>
                {field.label}
                {field.required.then_some(" *")}
            </label>
            {control}
        </div>
    }
    .into_any()
}

/// Варианты ссылки; текущее значение, ставшее недоступным, остаётся видимым
fn reference_choices(kind: EntityKind, current: &str, options: RwSignal<ReferenceOptions>) -> impl IntoView {
    let mut choices: Vec<(String, String)> = options.with(|o| {
        o.options(kind)
            .iter()
            .map(|option| (option.value.to_string(), option.label.clone()))
            .collect()
    });
    if !current.is_empty() && !choices.iter().any(|(value, _)| value == current) {
        choices.push((current.to_string(), format!("{current} (no disponible)")));
    }
    let current = current.to_string();
    choices
        .into_iter()
        .map(|(value, label)| {
            let selected = value == current;
            view! { <option value=value selected=selected>{label}</option> }
        })
        .collect_view()
}
