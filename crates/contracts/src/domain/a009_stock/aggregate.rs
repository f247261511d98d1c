use crate::domain::common::lenient;
use crate::domain::common::{CatalogEntity, CellSource, ColumnDef, EntityKind, RecordId, RecordStatus};
use crate::shared::form::FieldDef;
use crate::shared::list_query::{SortOption, TextKey};
use serde::{Deserialize, Serialize};

/// Остаток товара; собственного имени нет, в UI показывается id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(rename = "stock_id")]
    pub id: RecordId,

    #[serde(rename = "producto_id", default)]
    pub product_id: RecordId,

    #[serde(rename = "stock_cantidad", default, deserialize_with = "lenient::i64_from_any")]
    pub quantity: i64,

    #[serde(rename = "stock_status", default)]
    pub status: RecordStatus,

    #[serde(rename = "stock_fecha_modificacion", default, skip_serializing)]
    pub modified_at: Option<String>,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::id("stock_id", "ID"),
    FieldDef::reference("producto_id", "Producto", EntityKind::Product),
    FieldDef::integer("stock_cantidad", "Cantidad"),
    FieldDef::status("stock_status"),
];

const SORT_OPTIONS: &[SortOption] = &[
    SortOption::asc("product_asc", "Producto A-Z", TextKey::Related(EntityKind::Product)),
    SortOption::desc("product_desc", "Producto Z-A", TextKey::Related(EntityKind::Product)),
    SortOption::asc("id_asc", "ID ascendente", TextKey::Id),
];

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", CellSource::Id),
    ColumnDef::new("Producto", CellSource::Related(EntityKind::Product)),
    ColumnDef::new("Cantidad", CellSource::Field("stock_cantidad")),
    ColumnDef::new("Estado", CellSource::Status),
];

impl CatalogEntity for Stock {
    const KIND: EntityKind = EntityKind::Stock;
    const ID_FIELD: &'static str = "stock_id";
    const STATUS_FIELD: &'static str = "stock_status";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn display_name(&self) -> &str {
        self.id.as_str()
    }

    fn status(&self) -> RecordStatus {
        self.status
    }

    fn modified_at(&self) -> Option<&str> {
        self.modified_at.as_deref()
    }

    fn reference(&self, kind: EntityKind) -> Option<&RecordId> {
        match kind {
            EntityKind::Product => Some(&self.product_id),
            _ => None,
        }
    }

    fn form_fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn search_keys() -> &'static [TextKey] {
        &[TextKey::Related(EntityKind::Product)]
    }

    fn sort_options() -> &'static [SortOption] {
        SORT_OPTIONS
    }

    fn columns() -> &'static [ColumnDef] {
        COLUMNS
    }
}
