//! Форма сущности: поля, валидация, проверка уникальности и сохранение.

use crate::domain::common::{CatalogEntity, EntityKind, RecordId, RecordStatus};
use crate::domain::registry::ReferenceRow;
use crate::shared::api::{ApiError, EntityApi};
use crate::shared::integrity::{GuardError, GuardVerdict, IntegrityGuard, MutationAction};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Идентификатор; в режиме редактирования поле заблокировано
    Id,
    Text,
    Number { integer: bool },
    Reference(EntityKind),
    Status,
}

/// Описание одного поля формы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Имя поля на проводе
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDef {
    pub const fn id(key: &'static str, label: &'static str) -> Self {
        Self { key, label, kind: FieldKind::Id, required: true }
    }

    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self { key, label, kind: FieldKind::Text, required: true }
    }

    pub const fn optional_text(key: &'static str, label: &'static str) -> Self {
        Self { key, label, kind: FieldKind::Text, required: false }
    }

    pub const fn integer(key: &'static str, label: &'static str) -> Self {
        Self { key, label, kind: FieldKind::Number { integer: true }, required: true }
    }

    pub const fn decimal(key: &'static str, label: &'static str) -> Self {
        Self { key, label, kind: FieldKind::Number { integer: false }, required: true }
    }

    pub const fn reference(key: &'static str, label: &'static str, kind: EntityKind) -> Self {
        Self { key, label, kind: FieldKind::Reference(kind), required: true }
    }

    pub const fn optional_reference(key: &'static str, label: &'static str, kind: EntityKind) -> Self {
        Self { key, label, kind: FieldKind::Reference(kind), required: false }
    }

    pub const fn status(key: &'static str) -> Self {
        Self { key, label: "Estado", kind: FieldKind::Status, required: true }
    }
}

/// Режим формы
#[derive(Debug)]
pub enum FormMode<'a, E> {
    Create,
    Edit(&'a E),
}

// derive would require `E: Copy`
impl<E> Clone for FormMode<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for FormMode<'_, E> {}

impl<E> FormMode<'_, E> {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// Текущие значения полей, как их ввёл пользователь
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    values: HashMap<String, String>,
}

impl FormValues {
    /// Пустая форма создания; статус сразу `A`
    pub fn for_create<E: CatalogEntity>() -> Self {
        let mut form = Self::default();
        form.set(E::STATUS_FIELD, RecordStatus::Active.as_code());
        form
    }

    pub fn from_entity<E: CatalogEntity>(entity: &E) -> Self {
        let mut form = Self::default();
        let json = serde_json::to_value(entity).unwrap_or(Value::Null);
        for field in E::form_fields() {
            let text = match json.get(field.key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            form.set(field.key, text);
        }
        form
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: RecordId,
    pub label: String,
}

/// Варианты выпадающих списков: только активные записи
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceOptions {
    by_kind: HashMap<EntityKind, Vec<SelectOption>>,
}

impl ReferenceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_rows(&mut self, kind: EntityKind, rows: &[ReferenceRow]) {
        let options = rows
            .iter()
            .filter(|row| row.status.is_active())
            .map(|row| SelectOption {
                value: row.id.clone(),
                label: row.name.clone(),
            })
            .collect();
        self.by_kind.insert(kind, options);
    }

    pub fn options(&self, kind: EntityKind) -> &[SelectOption] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, kind: EntityKind, id: &RecordId) -> bool {
        self.options(kind).iter().any(|option| &option.value == id)
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("El campo \"{0}\" es obligatorio.")]
    MissingField(&'static str),

    #[error("El campo \"{0}\" debe ser un número válido.")]
    InvalidNumber(&'static str),

    #[error("El campo \"{0}\" no puede ser negativo.")]
    NegativeNumber(&'static str),

    #[error("Seleccione un valor activo para \"{0}\".")]
    UnavailableReference(&'static str),

    #[error("Ya existe {} con ese ID.", .0.indefinite_name())]
    DuplicateId(EntityKind),

    #[error("{0}")]
    Blocked(String),

    #[error("No se pudo verificar las dependencias: {0}")]
    Guard(#[from] GuardError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SaveError {
    /// Ошибки ввода, которые пользователь исправляет в самой форме
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SaveError::MissingField(_)
                | SaveError::InvalidNumber(_)
                | SaveError::NegativeNumber(_)
                | SaveError::UnavailableReference(_)
                | SaveError::DuplicateId(_)
        )
    }
}

/// Собирает запись из значений формы.
///
/// In edit mode the original record is the base, so wire fields the form does
/// not show (for example a supplier's status) survive the round trip.
pub fn build_entity<E: CatalogEntity>(
    values: &FormValues,
    mode: FormMode<'_, E>,
    options: &ReferenceOptions,
) -> Result<E, SaveError> {
    let mut map = match mode {
        FormMode::Edit(original) => match serde_json::to_value(original) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => return Err(ApiError::Decode(e.to_string()).into()),
        },
        FormMode::Create => Map::new(),
    };

    for field in E::form_fields() {
        let raw = values.get(field.key).trim();
        let value = match field.kind {
            // in edit mode the id is pinned after the loop
            FieldKind::Id if mode.is_edit() => continue,
            FieldKind::Id if raw.is_empty() => return Err(SaveError::MissingField(field.label)),
            FieldKind::Id => Value::String(raw.to_string()),
            FieldKind::Text => {
                if raw.is_empty() && field.required {
                    return Err(SaveError::MissingField(field.label));
                }
                Value::String(raw.to_string())
            }
            FieldKind::Number { integer } => parse_number(field, raw, integer)?,
            FieldKind::Reference(kind) => {
                if raw.is_empty() {
                    if field.required {
                        return Err(SaveError::MissingField(field.label));
                    }
                    Value::Null
                } else {
                    let id = RecordId::from(raw);
                    let unchanged = match mode {
                        FormMode::Edit(original) => original.reference(kind) == Some(&id),
                        FormMode::Create => false,
                    };
                    if !unchanged && !options.contains(kind, &id) {
                        return Err(SaveError::UnavailableReference(field.label));
                    }
                    Value::String(raw.to_string())
                }
            }
            FieldKind::Status => {
                let status = RecordStatus::from_code(raw).unwrap_or_default();
                Value::String(status.as_code().to_string())
            }
        };
        map.insert(field.key.to_string(), value);
    }
    if let FormMode::Edit(original) = mode {
        map.insert(E::ID_FIELD.to_string(), Value::String(original.id().to_string()));
    }

    serde_json::from_value(Value::Object(map)).map_err(|e| ApiError::Decode(e.to_string()).into())
}

fn parse_number(field: &FieldDef, raw: &str, integer: bool) -> Result<Value, SaveError> {
    if raw.is_empty() {
        if field.required {
            return Err(SaveError::MissingField(field.label));
        }
        return Ok(Value::from(0));
    }
    if integer {
        let n: i64 = raw.parse().map_err(|_| SaveError::InvalidNumber(field.label))?;
        if n < 0 {
            return Err(SaveError::NegativeNumber(field.label));
        }
        Ok(Value::from(n))
    } else {
        let n: f64 = raw
            .replace(',', ".")
            .parse()
            .map_err(|_| SaveError::InvalidNumber(field.label))?;
        if !n.is_finite() {
            return Err(SaveError::InvalidNumber(field.label));
        }
        if n < 0.0 {
            return Err(SaveError::NegativeNumber(field.label));
        }
        Ok(Value::from(n))
    }
}

/// Полный цикл сохранения формы.
///
/// Order: build and validate, duplicate id check, integrity check for an
/// `A → I` edit, then exactly one create or update call. `on_saved` runs once,
/// only after the write succeeded.
pub async fn submit<E, F>(
    api: &dyn EntityApi,
    values: &FormValues,
    mode: FormMode<'_, E>,
    existing: &[E],
    options: &ReferenceOptions,
    on_saved: F,
) -> Result<E, SaveError>
where
    E: CatalogEntity,
    F: FnOnce(&E),
{
    let entity = build_entity::<E>(values, mode, options)?;

    let id_changed = match mode {
        FormMode::Create => true,
        FormMode::Edit(original) => original.id() != entity.id(),
    };
    if id_changed && existing.iter().any(|item| item.id() == entity.id()) {
        return Err(SaveError::DuplicateId(E::KIND));
    }

    if let FormMode::Edit(original) = mode {
        if original.status().is_active() && !entity.status().is_active() {
            let verdict = IntegrityGuard::new(api)
                .check(MutationAction::Deactivate, E::KIND, original.id())
                .await?;
            if let GuardVerdict::Blocked { reason, .. } = verdict {
                return Err(SaveError::Blocked(reason));
            }
        }
    }

    let body = serde_json::to_value(&entity).map_err(|e| ApiError::Decode(e.to_string()))?;
    let response = match mode {
        FormMode::Create => api.create(E::KIND, &body).await?,
        FormMode::Edit(original) => api.update(E::KIND, original.id(), &body).await?,
    };
    let saved = serde_json::from_value::<E>(response).unwrap_or(entity);

    log::info!("{} {} guardado", E::KIND.title(), saved.id());
    on_saved(&saved);
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_artist::aggregate::Artist;
    use crate::domain::a002_album::aggregate::Album;
    use crate::domain::a005_product::aggregate::Product;
    use crate::domain::registry::reference_rows;
    use crate::shared::api::mock::{Call, MockApi};
    use serde_json::json;
    use std::cell::Cell;

    fn artist_options() -> ReferenceOptions {
        let rows = reference_rows(
            EntityKind::Artist,
            vec![
                json!({"artista_id": "AR1", "artista_nombre": "Michael Jackson", "artista_status": "A"}),
                json!({"artista_id": "AR2", "artista_nombre": "Retirado", "artista_status": "I"}),
            ],
        );
        let mut options = ReferenceOptions::new();
        options.insert_rows(EntityKind::Artist, &rows);
        options
    }

    fn album_values(id: &str, name: &str, artist: &str) -> FormValues {
        let mut values = FormValues::for_create::<Album>();
        values.set("album_id", id);
        values.set("album_nombre", name);
        values.set("artista_id", artist);
        values
    }

    #[test]
    fn create_form_defaults_to_active() {
        let values = FormValues::for_create::<Album>();
        assert_eq!(values.get("album_status"), "A");
        assert_eq!(values.get("album_nombre"), "");
    }

    #[test]
    fn options_list_only_active_records() {
        let options = artist_options();
        assert_eq!(options.options(EntityKind::Artist).len(), 1);
        assert!(options.contains(EntityKind::Artist, &RecordId::from("AR1")));
        assert!(!options.contains(EntityKind::Artist, &RecordId::from("AR2")));
    }

    #[test]
    fn validation_errors() {
        let options = artist_options();
        let missing = album_values("A1", "  ", "AR1");
        assert!(matches!(
            build_entity::<Album>(&missing, FormMode::Create, &options),
            Err(SaveError::MissingField("Nombre"))
        ));

        let inactive_artist = album_values("A1", "Bad", "AR2");
        assert!(matches!(
            build_entity::<Album>(&inactive_artist, FormMode::Create, &options),
            Err(SaveError::UnavailableReference(_))
        ));
    }

    #[test]
    fn edit_keeps_unchanged_inactive_reference() {
        let options = artist_options();
        let original = Album {
            id: RecordId::from("A9"),
            name: "Viejo".into(),
            artist_id: RecordId::from("AR2"),
            status: RecordStatus::Active,
            modified_at: Some("2024-01-01T10:00:00".into()),
        };
        let mut values = FormValues::from_entity(&original);
        values.set("album_nombre", "Viejo (remaster)");
        let album = build_entity::<Album>(&values, FormMode::Edit(&original), &options).unwrap();
        assert_eq!(album.artist_id.as_str(), "AR2");
        assert_eq!(album.name, "Viejo (remaster)");
    }

    #[test]
    fn edit_pins_the_original_id() {
        let original = Artist {
            id: RecordId::from("AR1"),
            name: "Soda Stereo".into(),
            status: RecordStatus::Active,
            modified_at: None,
        };
        let mut values = FormValues::from_entity(&original);
        values.set(Artist::ID_FIELD, "AR99");
        let artist = build_entity::<Artist>(&values, FormMode::Edit(&original), &ReferenceOptions::new()).unwrap();
        assert_eq!(artist.id.as_str(), "AR1");

        let created = FormValues::for_create::<Artist>();
        assert_eq!(created.get(Artist::STATUS_FIELD), "A");
    }

    #[test]
    fn negative_and_malformed_numbers_are_rejected() {
        let mut values = FormValues::for_create::<Product>();
        values.set("producto_id", "P1");
        values.set("producto_nombre", "Vinilo");
        values.set("producto_precio", "-3");
        let err = build_entity::<Product>(&values, FormMode::Create, &ReferenceOptions::new());
        assert!(matches!(err, Err(SaveError::NegativeNumber("Precio"))));

        values.set("producto_precio", "doce");
        let err = build_entity::<Product>(&values, FormMode::Create, &ReferenceOptions::new());
        assert!(matches!(err, Err(SaveError::InvalidNumber("Precio"))));
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected_without_write() {
        let api = MockApi::new();
        let existing = vec![Artist {
            id: RecordId::from("AR1"),
            name: "Michael Jackson".into(),
            status: RecordStatus::Active,
            modified_at: None,
        }];
        let mut values = FormValues::for_create::<Artist>();
        values.set("artista_id", "AR1");
        values.set("artista_nombre", "Otro");

        let saved = Cell::new(0);
        let result = submit(&api, &values, FormMode::Create, &existing, &ReferenceOptions::new(), |_| {
            saved.set(saved.get() + 1)
        })
        .await;

        match result {
            Err(SaveError::DuplicateId(kind)) => assert_eq!(kind, EntityKind::Artist),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(
            SaveError::DuplicateId(EntityKind::Artist).to_string(),
            "Ya existe un artista con ese ID."
        );
        assert_eq!(saved.get(), 0);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn novel_id_creates_once_and_notifies_once() {
        let api = MockApi::new();
        let values = album_values("A1", "Thriller", "AR1");
        let saved = Cell::new(0);
        let album = submit::<Album, _>(&api, &values, FormMode::Create, &[], &artist_options(), |_| {
            saved.set(saved.get() + 1)
        })
        .await
        .unwrap();

        assert_eq!(album.id.as_str(), "A1");
        assert_eq!(saved.get(), 1);
        assert_eq!(api.calls(), vec![Call::Create(EntityKind::Album)]);
    }

    #[tokio::test]
    async fn deactivating_through_edit_is_guarded() {
        let api = MockApi::new().with_collection(
            EntityKind::Album,
            vec![json!({"album_id": "A1", "album_nombre": "Thriller", "artista_id": "AR1", "album_status": "A"})],
        );
        let original = Artist {
            id: RecordId::from("AR1"),
            name: "Michael Jackson".into(),
            status: RecordStatus::Active,
            modified_at: None,
        };
        let mut values = FormValues::from_entity(&original);
        values.set("artista_status", "I");

        let result = submit(
            &api,
            &values,
            FormMode::Edit(&original),
            std::slice::from_ref(&original),
            &ReferenceOptions::new(),
            |_| panic!("must not be saved"),
        )
        .await;

        match result {
            Err(SaveError::Blocked(reason)) => assert!(reason.contains("álbum")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(api.calls(), vec![Call::List(EntityKind::Album)]);
    }

    #[tokio::test]
    async fn album_then_blocked_artist_deactivation() {
        use crate::shared::api::fetch_all;

        let artist = Artist {
            id: RecordId::from("AR1"),
            name: "Michael Jackson".into(),
            status: RecordStatus::Active,
            modified_at: None,
        };
        let api = MockApi::new().with_collection(
            EntityKind::Artist,
            vec![serde_json::to_value(&artist).unwrap()],
        );

        let refreshes = Cell::new(0);
        let values = album_values("A1", "Thriller", "AR1");
        submit::<Album, _>(&api, &values, FormMode::Create, &[], &artist_options(), |_| {
            refreshes.set(refreshes.get() + 1)
        })
        .await
        .unwrap();
        assert_eq!(refreshes.get(), 1);

        let albums = fetch_all::<Album>(&api).await.unwrap();
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].name, "Thriller");

        let mut values = FormValues::from_entity(&artist);
        values.set("artista_status", "I");
        let err = submit(
            &api,
            &values,
            FormMode::Edit(&artist),
            std::slice::from_ref(&artist),
            &ReferenceOptions::new(),
            |_| refreshes.set(refreshes.get() + 1),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("asociado a un álbum"));
        assert_eq!(refreshes.get(), 1);
        assert!(!api
            .calls()
            .iter()
            .any(|call| matches!(call, Call::Update(..) | Call::SetStatus(..))));
    }

    #[tokio::test]
    async fn server_rejection_keeps_reason() {
        let api = MockApi::new().rejecting_writes(ApiError::Rejected {
            status: 400,
            code: Some("duplicado".into()),
            message: "El nombre ya existe".into(),
        });
        let mut values = FormValues::for_create::<Artist>();
        values.set("artista_id", "AR5");
        values.set("artista_nombre", "Nuevo");

        let err = submit::<Artist, _>(&api, &values, FormMode::Create, &[], &ReferenceOptions::new(), |_| {})
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "El nombre ya existe");
    }
}
