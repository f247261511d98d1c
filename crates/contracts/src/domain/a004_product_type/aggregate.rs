use crate::domain::common::{CatalogEntity, CellSource, ColumnDef, EntityKind, RecordId, RecordStatus};
use crate::shared::form::FieldDef;
use crate::shared::list_query::{SortOption, TextKey};
use serde::{Deserialize, Serialize};

/// Тип продукта (CD, винил, кассета...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    #[serde(rename = "tipo_id")]
    pub id: RecordId,

    #[serde(rename = "tipo_nombre", default)]
    pub name: String,

    #[serde(rename = "tipo_status", default)]
    pub status: RecordStatus,

    #[serde(rename = "tipo_fecha_modificacion", default, skip_serializing)]
    pub modified_at: Option<String>,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::id("tipo_id", "ID"),
    FieldDef::text("tipo_nombre", "Nombre"),
    FieldDef::status("tipo_status"),
];

const SORT_OPTIONS: &[SortOption] = &[
    SortOption::asc("name_asc", "Nombre A-Z", TextKey::Name),
    SortOption::desc("name_desc", "Nombre Z-A", TextKey::Name),
];

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", CellSource::Id),
    ColumnDef::new("Nombre", CellSource::Name),
    ColumnDef::new("Estado", CellSource::Status),
];

impl CatalogEntity for ProductType {
    const KIND: EntityKind = EntityKind::ProductType;
    const ID_FIELD: &'static str = "tipo_id";
    const STATUS_FIELD: &'static str = "tipo_status";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> RecordStatus {
        self.status
    }

    fn modified_at(&self) -> Option<&str> {
        self.modified_at.as_deref()
    }

    fn form_fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn sort_options() -> &'static [SortOption] {
        SORT_OPTIONS
    }

    fn columns() -> &'static [ColumnDef] {
        COLUMNS
    }
}
