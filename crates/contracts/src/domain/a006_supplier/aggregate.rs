use crate::domain::common::{CatalogEntity, CellSource, ColumnDef, EntityKind, RecordId, RecordStatus};
use crate::shared::form::FieldDef;
use crate::shared::list_query::{SortOption, TextKey};
use serde::{Deserialize, Serialize};

/// Поставщик
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(rename = "proveedor_id")]
    pub id: RecordId,

    #[serde(rename = "proveedor_nombre", default)]
    pub name: String,

    #[serde(rename = "proveedor_direccion", default)]
    pub address: String,

    #[serde(rename = "proveedor_telefono", default)]
    pub phone: String,

    #[serde(rename = "proveedor_correo", default)]
    pub email: String,

    #[serde(rename = "proveedor_status", default)]
    pub status: RecordStatus,

    #[serde(rename = "proveedor_fecha_modificacion", default, skip_serializing)]
    pub modified_at: Option<String>,
}

// Статус поставщика в форме не редактируется
const FIELDS: &[FieldDef] = &[
    FieldDef::id("proveedor_id", "ID"),
    FieldDef::text("proveedor_nombre", "Nombre"),
    FieldDef::text("proveedor_direccion", "Dirección"),
    FieldDef::optional_text("proveedor_telefono", "Teléfono"),
    FieldDef::optional_text("proveedor_correo", "Correo"),
];

const SORT_OPTIONS: &[SortOption] = &[
    SortOption::asc("name_asc", "Nombre A-Z", TextKey::Name),
    SortOption::desc("name_desc", "Nombre Z-A", TextKey::Name),
];

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", CellSource::Id),
    ColumnDef::new("Nombre", CellSource::Name),
    ColumnDef::new("Dirección", CellSource::Field("proveedor_direccion")),
    ColumnDef::new("Teléfono", CellSource::Field("proveedor_telefono")),
    ColumnDef::new("Correo", CellSource::Field("proveedor_correo")),
    ColumnDef::new("Estado", CellSource::Status),
];

impl CatalogEntity for Supplier {
    const KIND: EntityKind = EntityKind::Supplier;
    const ID_FIELD: &'static str = "proveedor_id";
    const STATUS_FIELD: &'static str = "proveedor_status";

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
