use crate::domain::common::lenient;
use crate::domain::common::{CatalogEntity, CellSource, ColumnDef, EntityKind, RecordId, RecordStatus};
use crate::shared::form::FieldDef;
use crate::shared::list_query::{SortOption, TextKey};
use serde::{Deserialize, Serialize};

/// Инвентаризация: сколько единиц товара лежит в месте хранения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(rename = "inventario_id")]
    pub id: RecordId,

    #[serde(rename = "ubicacion_id", default)]
    pub location_id: RecordId,

    #[serde(rename = "producto_id", default)]
    pub product_id: RecordId,

    #[serde(rename = "stock_id", default)]
    pub stock_id: RecordId,

    #[serde(rename = "inventario_cantidad", default, deserialize_with = "lenient::i64_from_any")]
    pub quantity: i64,

    #[serde(rename = "inventario_status", default)]
    pub status: RecordStatus,

    #[serde(rename = "inventario_fecha_modificacion", default, skip_serializing)]
    pub modified_at: Option<String>,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::id("inventario_id", "ID"),
    FieldDef::reference("ubicacion_id", "Ubicación", EntityKind::Location),
    FieldDef::reference("producto_id", "Producto", EntityKind::Product),
    FieldDef::reference("stock_id", "Stock", EntityKind::Stock),
    FieldDef::integer("inventario_cantidad", "Cantidad"),
    FieldDef::status("inventario_status"),
];

const SORT_OPTIONS: &[SortOption] = &[
    SortOption::asc("product_asc", "Producto A-Z", TextKey::Related(EntityKind::Product)),
    SortOption::desc("product_desc", "Producto Z-A", TextKey::Related(EntityKind::Product)),
    SortOption::asc("location_asc", "Ubicación A-Z", TextKey::Related(EntityKind::Location)),
    SortOption::desc("location_desc", "Ubicación Z-A", TextKey::Related(EntityKind::Location)),
];

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", CellSource::Id),
    ColumnDef::new("Ubicación", CellSource::Related(EntityKind::Location)),
    ColumnDef::new("Producto", CellSource::Related(EntityKind::Product)),
    ColumnDef::new("Stock", CellSource::Related(EntityKind::Stock)),
    ColumnDef::new("Cantidad", CellSource::Field("inventario_cantidad")),
    ColumnDef::new("Estado", CellSource::Status),
];

impl CatalogEntity for Inventory {
    const KIND: EntityKind = EntityKind::Inventory;
    const ID_FIELD: &'static str = "inventario_id";
    const STATUS_FIELD: &'static str = "inventario_status";

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
            EntityKind::Location => Some(&self.location_id),
            EntityKind::Product => Some(&self.product_id),
            EntityKind::Stock => Some(&self.stock_id),
            _ => None,
        }
    }

    fn form_fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn search_keys() -> &'static [TextKey] {
        &[TextKey::Related(EntityKind::Product), TextKey::Related(EntityKind::Location)]
    }

    fn sort_options() -> &'static [SortOption] {
        SORT_OPTIONS
    }

    fn columns() -> &'static [ColumnDef] {
        COLUMNS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_names_of_every_referenced_kind() {
        assert_eq!(
            Inventory::related_kinds(),
            vec![EntityKind::Location, EntityKind::Product, EntityKind::Stock]
        );
    }
}
