use super::{EntityKind, RecordId, RecordStatus};
use crate::shared::form::FieldDef;
use crate::shared::list_query::{RelatedNames, SortOption, TextKey};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Трейт для всех сущностей консоли
///
/// One implementation per entity type carries everything the generic list
/// screen, form and integrity guard need: identity, status, outgoing foreign
/// keys, the form field list, sort options and table columns.
pub trait CatalogEntity:
    Clone + PartialEq + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: EntityKind;

    /// Имя поля идентификатора на проводе (например, "album_id")
    const ID_FIELD: &'static str;

    /// Имя поля статуса на проводе (например, "album_status")
    const STATUS_FIELD: &'static str;

    fn id(&self) -> &RecordId;

    /// Основное отображаемое имя; у записей без имени это id
    fn display_name(&self) -> &str;

    fn status(&self) -> RecordStatus;

    /// Серверная дата изменения, как пришла с бэкенда
    fn modified_at(&self) -> Option<&str> {
        None
    }

    /// Внешний ключ на сущность указанного типа
    fn reference(&self, _kind: EntityKind) -> Option<&RecordId> {
        None
    }

    fn form_fields() -> &'static [FieldDef];

    fn search_keys() -> &'static [TextKey] {
        &[TextKey::Name]
    }

    fn sort_options() -> &'static [SortOption];

    fn columns() -> &'static [ColumnDef];

    /// Типы, имена которых нужны списку (колонки, поиск, сортировка)
    fn related_kinds() -> Vec<EntityKind> {
        let mut kinds = Vec::new();
        let mut push = |kind: EntityKind| {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        };
        for column in Self::columns() {
            if let CellSource::Related(kind) = column.cell {
                push(kind);
            }
        }
        for key in Self::search_keys() {
            if let TextKey::Related(kind) = key {
                push(*kind);
            }
        }
        for option in Self::sort_options() {
            if let TextKey::Related(kind) = option.spec.field {
                push(kind);
            }
        }
        kinds
    }

    /// Все внешние ключи записи
    fn references(&self) -> Vec<(EntityKind, RecordId)> {
        EntityKind::all()
            .into_iter()
            .filter_map(|kind| self.reference(kind).map(|id| (kind, id.clone())))
            .filter(|(_, id)| !id.is_blank())
            .collect()
    }
}

/// Источник значения ячейки таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSource {
    Id,
    Name,
    /// Имя связанной записи по внешнему ключу
    Related(EntityKind),
    /// Произвольное поле по имени на проводе
    Field(&'static str),
    Status,
    ModifiedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub title: &'static str,
    pub cell: CellSource,
}

impl ColumnDef {
    pub const fn new(title: &'static str, cell: CellSource) -> Self {
        Self { title, cell }
    }
}

/// Текст ячейки; дата изменения возвращается как есть, форматирует UI
pub fn cell_text<E: CatalogEntity>(item: &E, cell: CellSource, names: &RelatedNames) -> String {
    match cell {
        CellSource::Id => item.id().to_string(),
        CellSource::Name => item.display_name().to_string(),
        CellSource::Related(kind) => match item.reference(kind) {
            Some(id) => names
                .name_of(kind, id)
                .map(str::to_string)
                .unwrap_or_else(|| missing_reference_label(kind).to_string()),
            None => String::new(),
        },
        CellSource::Field(key) => field_text(item, key),
        CellSource::Status => item.status().label().to_string(),
        CellSource::ModifiedAt => item.modified_at().unwrap_or("-").to_string(),
    }
}

fn missing_reference_label(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Artist => "Sin artista",
        EntityKind::Album => "Sin álbum",
        EntityKind::Catalog => "Sin catálogo",
        EntityKind::ProductType => "Sin tipo",
        EntityKind::Product => "Sin producto",
        EntityKind::Building => "Sin edificio",
        EntityKind::Location => "Sin ubicación",
        EntityKind::Stock => "Sin stock",
        EntityKind::Supplier => "Sin proveedor",
        EntityKind::Inventory => "Sin inventario",
    }
}

fn field_text<E: Serialize>(item: &E, key: &str) -> String {
    let value = match serde_json::to_value(item) {
        Ok(value) => value,
        Err(_) => return String::new(),
    };
    match value.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
