use crate::domain::common::{CatalogEntity, CellSource, ColumnDef, EntityKind, RecordId, RecordStatus};
use crate::shared::form::FieldDef;
use crate::shared::list_query::{SortOption, TextKey};
use serde::{Deserialize, Serialize};

/// Место хранения внутри здания
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "ubicacion_id")]
    pub id: RecordId,

    #[serde(rename = "ubicacion_nombre", default)]
    pub name: String,

    #[serde(rename = "edificio_id", default)]
    pub building_id: RecordId,

    #[serde(rename = "ubicacion_status", default)]
    pub status: RecordStatus,

    #[serde(rename = "ubicacion_fecha_modificacion", default, skip_serializing)]
    pub modified_at: Option<String>,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::id("ubicacion_id", "ID"),
    FieldDef::text("ubicacion_nombre", "Nombre"),
    FieldDef::reference("edificio_id", "Edificio", EntityKind::Building),
    FieldDef::status("ubicacion_status"),
];

const SORT_OPTIONS: &[SortOption] = &[
    SortOption::asc("name_asc", "Nombre A-Z", TextKey::Name),
    SortOption::desc("name_desc", "Nombre Z-A", TextKey::Name),
    SortOption::asc("building_asc", "Edificio A-Z", TextKey::Related(EntityKind::Building)),
    SortOption::desc("building_desc", "Edificio Z-A", TextKey::Related(EntityKind::Building)),
];

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", CellSource::Id),
    ColumnDef::new("Nombre", CellSource::Name),
    ColumnDef::new("Edificio", CellSource::Related(EntityKind::Building)),
    ColumnDef::new("Estado", CellSource::Status),
];

impl CatalogEntity for Location {
    const KIND: EntityKind = EntityKind::Location;
    const ID_FIELD: &'static str = "ubicacion_id";
    const STATUS_FIELD: &'static str = "ubicacion_status";

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

    fn reference(&self, kind: EntityKind) -> Option<&RecordId> {
        match kind {
            EntityKind::Building => Some(&self.building_id),
            _ => None,
        }
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
