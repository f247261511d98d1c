use crate::domain::common::{CatalogEntity, CellSource, ColumnDef, EntityKind, RecordId, RecordStatus};
use crate::shared::form::FieldDef;
use crate::shared::list_query::{SortOption, TextKey};
use serde::{Deserialize, Serialize};

/// Здание (склад или магазин)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    #[serde(rename = "edificio_id")]
    pub id: RecordId,

    #[serde(rename = "edificio_nombre", default)]
    pub name: String,

    #[serde(rename = "edificio_direccion", default)]
    pub address: String,

    #[serde(rename = "edificio_status", default)]
    pub status: RecordStatus,

    #[serde(rename = "edificio_fecha_modificacion", default, skip_serializing)]
    pub modified_at: Option<String>,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::id("edificio_id", "ID"),
    FieldDef::text("edificio_nombre", "Nombre"),
    FieldDef::text("edificio_direccion", "Dirección"),
];

const SORT_OPTIONS: &[SortOption] = &[
    SortOption::asc("name_asc", "Nombre A-Z", TextKey::Name),
    SortOption::desc("name_desc", "Nombre Z-A", TextKey::Name),
];

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", CellSource::Id),
    ColumnDef::new("Nombre", CellSource::Name),
    ColumnDef::new("Dirección", CellSource::Field("edificio_direccion")),
    ColumnDef::new("Estado", CellSource::Status),
];

impl CatalogEntity for Building {
    const KIND: EntityKind = EntityKind::Building;
    const ID_FIELD: &'static str = "edificio_id";
    const STATUS_FIELD: &'static str = "edificio_status";

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
