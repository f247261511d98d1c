use crate::shared::api_client::HttpEntityApi;
use crate::shared::config::config;
use crate::shared::list_utils::sort_option;
use crate::shared::notifications::{NotificationService, ToastLevel};
use contracts::domain::common::{CatalogEntity, EntityKind, StatusFilter};
use contracts::domain::registry::{reference_rows, ReferenceRow};
use contracts::shared::api::{change_status, fetch_all, fetch_one, remove, ApiError, EntityApi};
use contracts::shared::form::SaveError;
use contracts::shared::integrity::{GuardVerdict, IntegrityGuard, MutationAction};
use contracts::shared::list_query::{ListQuery, Page, RelatedNames};
use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Флаг жизни экрана: асинхронные ответы после размонтирования игнорируются
#[derive(Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        let flag = Self(Arc::new(AtomicBool::new(true)));
        let on_end = flag.clone();
        on_cleanup(move || on_end.0.store(false, Ordering::Relaxed));
        flag
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Итог изменения записи из списка или формы
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Done,
    /// Запись связана с другими; ничего не записано
    Blocked(String),
    Failed(String),
}

impl MutationOutcome {
    /// Уведомление для неуспешного итога; текст успеха задаёт вызывающий
    pub fn failure_toast(&self) -> Option<(ToastLevel, &str)> {
        match self {
            MutationOutcome::Done => None,
            MutationOutcome::Blocked(reason) => Some((ToastLevel::Warning, reason)),
            MutationOutcome::Failed(message) => Some((ToastLevel::Error, message)),
        }
    }

    fn report(&self, notifications: &NotificationService) {
        if let Some((level, message)) = self.failure_toast() {
            notifications.notify(level, message);
        }
    }
}

impl From<&SaveError> for MutationOutcome {
    fn from(error: &SaveError) -> Self {
        match error {
            SaveError::Blocked(reason) => MutationOutcome::Blocked(reason.clone()),
            other => MutationOutcome::Failed(other.to_string()),
        }
    }
}

/// Параллельно загружает коллекции указанных типов как строки-ссылки
pub async fn load_reference_rows(
    api: &dyn EntityApi,
    kinds: &[EntityKind],
) -> Vec<(EntityKind, Result<Vec<ReferenceRow>, ApiError>)> {
    let responses = join_all(kinds.iter().map(|kind| api.list(*kind))).await;
    kinds
        .iter()
        .copied()
        .zip(responses)
        .map(|(kind, response)| (kind, response.map(|values| reference_rows(kind, values))))
        .collect()
}

/// Состояние списка одного типа сущности
#[derive(Clone)]
pub struct EntityListViewModel<E: CatalogEntity> {
    pub items: RwSignal<Vec<E>>,
    pub names: RwSignal<RelatedNames>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub search: RwSignal<String>,
    pub status: RwSignal<StatusFilter>,
    pub sort_key: RwSignal<Option<&'static str>>,
    pub page: RwSignal<usize>,
    /// None: форма закрыта, Some(None): создание, Some(Some(e)): редактирование
    pub editing: RwSignal<Option<Option<E>>>,
    /// Идёт смена статуса или удаление
    pub busy: RwSignal<bool>,
    pub notifications: NotificationService,
    alive: Liveness,
}

impl<E: CatalogEntity> EntityListViewModel<E> {
    pub fn new(notifications: NotificationService) -> Self {
        let vm = Self {
            items: RwSignal::new(Vec::new()),
            names: RwSignal::new(RelatedNames::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            search: RwSignal::new(String::new()),
            status: RwSignal::new(StatusFilter::All),
            sort_key: RwSignal::new(None),
            page: RwSignal::new(1),
            editing: RwSignal::new(None),
            busy: RwSignal::new(false),
            notifications,
            alive: Liveness::new(),
        };

        // новый поиск, фильтр или сортировка начинают с первой страницы
        let (search, status, sort_key, page) = (vm.search, vm.status, vm.sort_key, vm.page);
        Effect::new(move |prev: Option<()>| {
            search.track();
            status.track();
            sort_key.track();
            if prev.is_some() {
                page.set(1);
            }
        });
        vm
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            search: self.search.get(),
            status: self.status.get(),
            sort: sort_option(E::sort_options(), self.sort_key.get()).map(|option| option.spec),
            page: self.page.get(),
        }
    }

    /// Видимая страница; пересчитывается при любом изменении входов
    pub fn visible_page(&self) -> Memo<Page<E>> {
        let vm = self.clone();
        let page_size = config().page_size();
        Memo::new(move |_| {
            let query = vm.query();
            vm.items
                .with(|items| vm.names.with(|names| query.apply_with_size(items, names, page_size)))
        })
    }

    pub fn open_create(&self) {
        self.editing.set(Some(None));
    }

    /// Форма редактирования открывается на свежей копии записи
    pub fn open_edit(&self, item: E) {
        let vm = self.clone();
        spawn_local(async move {
            let api = HttpEntityApi::from_config();
            let fresh = fetch_one::<E>(&api, item.id()).await;
            if !vm.alive.is_alive() {
                return;
            }
            match fresh {
                Ok(Some(current)) => vm.editing.set(Some(Some(current))),
                Ok(None) => {
                    vm.notifications.error(format!(
                        "{} \"{}\" ya no existe.",
                        E::KIND.title(),
                        item.display_name()
                    ));
                    vm.refresh().await;
                }
                Err(e) => {
                    log::warn!("{} {}: reread failed, editing cached copy: {e}", E::KIND, item.id());
                    vm.editing.set(Some(Some(item)));
                }
            }
        });
    }

    /// Перечитать коллекцию и имена связанных записей
    pub async fn refresh(&self) {
        if !self.alive.is_alive() {
            return;
        }
        self.loading.set(true);

        let api = HttpEntityApi::from_config();
        let kinds = E::related_kinds();
        let (items, related) = futures::join!(fetch_all::<E>(&api), load_reference_rows(&api, &kinds));

        if !self.alive.is_alive() {
            return;
        }
        match items {
            Ok(items) => {
                self.items.set(items);
                self.error.set(None);
            }
            Err(e) => {
                log::error!("{}: load failed: {e}", E::KIND);
                // прежние данные остаются на экране
                let message = format!("No se pudieron cargar {}: {e}", E::KIND.list_name().to_lowercase());
                self.error.set(Some(message.clone()));
                self.notifications.error(message);
            }
        }

        let mut names = RelatedNames::new();
        for (kind, rows) in related {
            match rows {
                Ok(rows) => names.insert_rows(kind, &rows),
                Err(e) => log::warn!("{}: related {kind} unavailable: {e}", E::KIND),
            }
        }
        self.names.set(names);
        self.loading.set(false);
    }

    pub fn reload(&self) {
        let vm = self.clone();
        spawn_local(async move { vm.refresh().await });
    }

    /// Активировать или деактивировать; деактивация проходит проверку ссылок
    pub fn toggle_status(&self, item: E) {
        let vm = self.clone();
        spawn_local(async move {
            let target = item.status().toggled();
            let api = HttpEntityApi::from_config();
            vm.busy.set(true);

            let outcome = async {
                if !target.is_active() {
                    if let Some(stop) = guard_outcome(&api, MutationAction::Deactivate, &item).await {
                        return stop;
                    }
                }
                match change_status::<E>(&api, item.id(), target).await {
                    Ok(()) => MutationOutcome::Done,
                    Err(e) => MutationOutcome::Failed(e.to_string()),
                }
            }
            .await;

            if !vm.alive.is_alive() {
                return;
            }
            vm.busy.set(false);
            if outcome == MutationOutcome::Done {
                log::info!("{} {} -> {}", E::KIND, item.id(), target.as_code());
                let verb = if target.is_active() { "activó" } else { "desactivó" };
                vm.notifications.success(format!(
                    "Se {verb} {} \"{}\".",
                    E::KIND.element_name(),
                    item.display_name()
                ));
                vm.refresh().await;
                return;
            }
            if let MutationOutcome::Failed(message) = &outcome {
                log::error!("{} {}: status change failed: {message}", E::KIND, item.id());
            }
            outcome.report(&vm.notifications);
        });
    }

    /// Удаление с подтверждением и проверкой ссылок
    pub fn delete(&self, item: E) {
        let question = format!(
            "¿Está seguro de eliminar {} \"{}\"?",
            E::KIND.element_name(),
            item.display_name()
        );
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&question).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let vm = self.clone();
        spawn_local(async move {
            let api = HttpEntityApi::from_config();
            vm.busy.set(true);

            let outcome = match guard_outcome(&api, MutationAction::Delete, &item).await {
                Some(stop) => stop,
                None => match remove::<E>(&api, item.id()).await {
                    Ok(()) => MutationOutcome::Done,
                    Err(e) => MutationOutcome::Failed(e.to_string()),
                },
            };

            if !vm.alive.is_alive() {
                return;
            }
            vm.busy.set(false);
            if outcome == MutationOutcome::Done {
                log::info!("{} {} deleted", E::KIND, item.id());
                vm.notifications.success(format!(
                    "Se eliminó {} \"{}\".",
                    E::KIND.element_name(),
                    item.display_name()
                ));
                vm.refresh().await;
                return;
            }
            if let MutationOutcome::Failed(message) = &outcome {
                log::error!("{} {}: delete failed: {message}", E::KIND, item.id());
            }
            outcome.report(&vm.notifications);
        });
    }
}

/// `None`, если связей нет и изменение можно выполнять
async fn guard_outcome<E: CatalogEntity>(
    api: &dyn EntityApi,
    action: MutationAction,
    item: &E,
) -> Option<MutationOutcome> {
    match IntegrityGuard::new(api).check(action, E::KIND, item.id()).await {
        Ok(GuardVerdict::Allowed) => None,
        Ok(GuardVerdict::Blocked { reason, .. }) => Some(MutationOutcome::Blocked(reason)),
        Err(e) => Some(MutationOutcome::Failed(format!(
            "No se pudo verificar las dependencias: {e}"
        ))),
    }
}
