use crate::domain::common::{CatalogEntity, CellSource, ColumnDef, EntityKind, RecordId, RecordStatus};
use crate::shared::form::FieldDef;
use crate::shared::list_query::{SortOption, TextKey};
use serde::{Deserialize, Serialize};

/// Каталог товаров
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "catalogo_id")]
    pub id: RecordId,

    #[serde(rename = "catalogo_nombre", default)]
    pub name: String,

    #[serde(rename = "catalogo_status", default)]
    pub status: RecordStatus,

    #[serde(rename = "catalogo_fecha_modificacion", default, skip_serializing)]
    pub modified_at: Option<String>,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::id("catalogo_id", "ID"),
    FieldDef::text("catalogo_nombre", "Nombre"),
    FieldDef::status("catalogo_status"),
];

const SORT_OPTIONS: &[SortOption] = &[
    SortOption::asc("name_asc", "Nombre A-Z", TextKey::Name),
    SortOption::desc("name_desc", "Nombre Z-A", TextKey::Name),
];

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", CellSource::Id),
    ColumnDef::new("Nombre", CellSource::Name),
    ColumnDef::new("Estado", CellSource::Status),
    ColumnDef::new("Última modificación", CellSource::ModifiedAt),
];

impl CatalogEntity for Catalog {
    const KIND: EntityKind = EntityKind::Catalog;
    const ID_FIELD: &'static str = "catalogo_id";
    const STATUS_FIELD: &'static str = "catalogo_status";

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
