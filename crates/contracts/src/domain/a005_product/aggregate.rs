use crate::domain::common::lenient;
use crate::domain::common::{CatalogEntity, CellSource, ColumnDef, EntityKind, RecordId, RecordStatus};
use crate::shared::form::FieldDef;
use crate::shared::list_query::{SortOption, TextKey};
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Товар магазина
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "producto_id")]
    pub id: RecordId,

    #[serde(rename = "producto_nombre", default)]
    pub name: String,

    #[serde(rename = "tipo_id", default)]
    pub product_type_id: RecordId,

    #[serde(rename = "catalogo_id", default)]
    pub catalog_id: RecordId,

    /// Пусто для товаров без альбома (аксессуары и т.п.)
    #[serde(rename = "album_id", default)]
    pub album_id: RecordId,

    #[serde(rename = "producto_precio", default, deserialize_with = "lenient::f64_from_any")]
    pub price: f64,

    #[serde(rename = "producto_status", default)]
    pub status: RecordStatus,

    #[serde(rename = "producto_fecha_modificacion", default, skip_serializing)]
    pub modified_at: Option<String>,
}

// ============================================================================
// Screen configuration
// ============================================================================

const FIELDS: &[FieldDef] = &[
    FieldDef::id("producto_id", "ID"),
    FieldDef::text("producto_nombre", "Nombre"),
    FieldDef::decimal("producto_precio", "Precio"),
    FieldDef::reference("tipo_id", "Tipo de producto", EntityKind::ProductType),
    FieldDef::reference("catalogo_id", "Catálogo", EntityKind::Catalog),
    FieldDef::optional_reference("album_id", "Álbum", EntityKind::Album),
    FieldDef::status("producto_status"),
];

const SORT_OPTIONS: &[SortOption] = &[
    SortOption::asc("name_asc", "Nombre A-Z", TextKey::Name),
    SortOption::desc("name_desc", "Nombre Z-A", TextKey::Name),
    SortOption::asc("catalog_asc", "Catálogo A-Z", TextKey::Related(EntityKind::Catalog)),
    SortOption::asc("type_asc", "Tipo A-Z", TextKey::Related(EntityKind::ProductType)),
];

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", CellSource::Id),
    ColumnDef::new("Nombre", CellSource::Name),
    ColumnDef::new("Tipo", CellSource::Related(EntityKind::ProductType)),
    ColumnDef::new("Catálogo", CellSource::Related(EntityKind::Catalog)),
    ColumnDef::new("Álbum", CellSource::Related(EntityKind::Album)),
    ColumnDef::new("Precio", CellSource::Field("producto_precio")),
    ColumnDef::new("Estado", CellSource::Status),
];

impl CatalogEntity for Product {
    const KIND: EntityKind = EntityKind::Product;
    const ID_FIELD: &'static str = "producto_id";
    const STATUS_FIELD: &'static str = "producto_status";

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
            EntityKind::ProductType => Some(&self.product_type_id),
            EntityKind::Catalog => Some(&self.catalog_id),
            EntityKind::Album if !self.album_id.is_blank() => Some(&self.album_id),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::cell_text;
    use crate::shared::list_query::RelatedNames;

    #[test]
    fn price_accepts_string_and_is_written_as_number() {
        let product: Product = serde_json::from_str(
            r#"{"producto_id": 5, "producto_nombre": "Vinilo", "tipo_id": "T1", "catalogo_id": "C1", "producto_precio": "25.5"}"#,
        )
        .unwrap();
        assert_eq!(product.price, 25.5);
        assert!(product.album_id.is_blank());
        assert_eq!(serde_json::to_value(&product).unwrap()["producto_precio"], 25.5);
        assert_eq!(cell_text(&product, CellSource::Field("producto_precio"), &RelatedNames::new()), "25.5");
        assert_eq!(cell_text(&product, CellSource::Related(EntityKind::Album), &RelatedNames::new()), "");
    }
}
