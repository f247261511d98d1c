//! Диспетчеризация по типу сущности для сырых JSON-коллекций.

use super::a001_artist::aggregate::Artist;
use super::a002_album::aggregate::Album;
use super::a003_catalog::aggregate::Catalog;
use super::a004_product_type::aggregate::ProductType;
use super::a005_product::aggregate::Product;
use super::a006_supplier::aggregate::Supplier;
use super::a007_building::aggregate::Building;
use super::a008_location::aggregate::Location;
use super::a009_stock::aggregate::Stock;
use super::a010_inventory::aggregate::Inventory;
use super::common::{CatalogEntity, EntityKind, RecordId, RecordStatus};
use crate::shared::api::decode_list;
use crate::shared::list_query::RelatedNames;
use serde::Deserialize;
use serde_json::Value;

/// Минимальный срез записи: для выпадающих списков, имён и проверок связей
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRow {
    pub id: RecordId,
    pub name: String,
    pub status: RecordStatus,
    pub refs: Vec<(EntityKind, RecordId)>,
}

impl ReferenceRow {
    pub fn from_entity<E: CatalogEntity>(entity: &E) -> Self {
        Self {
            id: entity.id().clone(),
            name: entity.display_name().to_string(),
            status: entity.status(),
            refs: entity.references(),
        }
    }

    pub fn refers_to(&self, kind: EntityKind, id: &RecordId) -> bool {
        self.refs.iter().any(|(k, target)| *k == kind && target == id)
    }
}

/// Строки-ссылки коллекции; испорченные записи пропускаются
pub fn reference_rows(kind: EntityKind, values: Vec<Value>) -> Vec<ReferenceRow> {
    match kind {
        EntityKind::Artist => rows_of::<Artist>(values),
        EntityKind::Album => rows_of::<Album>(values),
        EntityKind::Catalog => rows_of::<Catalog>(values),
        EntityKind::ProductType => rows_of::<ProductType>(values),
        EntityKind::Product => rows_of::<Product>(values),
        EntityKind::Supplier => rows_of::<Supplier>(values),
        EntityKind::Building => rows_of::<Building>(values),
        EntityKind::Location => rows_of::<Location>(values),
        EntityKind::Stock => rows_of::<Stock>(values),
        EntityKind::Inventory => rows_of::<Inventory>(values),
    }
}

fn rows_of<E: CatalogEntity>(values: Vec<Value>) -> Vec<ReferenceRow> {
    decode_list::<E>(values).iter().map(ReferenceRow::from_entity).collect()
}

/// Одна запись; `None`, если она не декодируется
pub fn reference_row(kind: EntityKind, value: &Value) -> Option<ReferenceRow> {
    match kind {
        EntityKind::Artist => row_of::<Artist>(value),
        EntityKind::Album => row_of::<Album>(value),
        EntityKind::Catalog => row_of::<Catalog>(value),
        EntityKind::ProductType => row_of::<ProductType>(value),
        EntityKind::Product => row_of::<Product>(value),
        EntityKind::Supplier => row_of::<Supplier>(value),
        EntityKind::Building => row_of::<Building>(value),
        EntityKind::Location => row_of::<Location>(value),
        EntityKind::Stock => row_of::<Stock>(value),
        EntityKind::Inventory => row_of::<Inventory>(value),
    }
}

fn row_of<E: CatalogEntity>(value: &Value) -> Option<ReferenceRow> {
    E::deserialize(value).ok().map(|entity| ReferenceRow::from_entity(&entity))
}

/// Имя поля идентификатора на проводе
pub fn id_field(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Artist => Artist::ID_FIELD,
        EntityKind::Album => Album::ID_FIELD,
        EntityKind::Catalog => Catalog::ID_FIELD,
        EntityKind::ProductType => ProductType::ID_FIELD,
        EntityKind::Product => Product::ID_FIELD,
        EntityKind::Supplier => Supplier::ID_FIELD,
        EntityKind::Building => Building::ID_FIELD,
        EntityKind::Location => Location::ID_FIELD,
        EntityKind::Stock => Stock::ID_FIELD,
        EntityKind::Inventory => Inventory::ID_FIELD,
    }
}

/// Id сырой записи; строка и число дают один и тот же [`RecordId`]
pub fn record_id_of(kind: EntityKind, value: &Value) -> Option<RecordId> {
    value
        .get(id_field(kind))
        .and_then(|raw| RecordId::deserialize(raw).ok())
        .filter(|id| !id.is_blank())
}

impl RelatedNames {
    pub fn insert_rows(&mut self, kind: EntityKind, rows: &[ReferenceRow]) {
        for row in rows {
            self.insert(kind, row.id.clone(), row.name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::FieldKind;
    use serde_json::json;

    #[test]
    fn rows_carry_outgoing_references() {
        let rows = reference_rows(
            EntityKind::Product,
            vec![json!({
                "producto_id": "P1", "producto_nombre": "Thriller LP", "tipo_id": "T1",
                "catalogo_id": "C1", "album_id": null, "producto_precio": "19.90", "producto_status": "A"
            })],
        );
        let row = &rows[0];
        assert_eq!(row.name, "Thriller LP");
        assert!(row.refers_to(EntityKind::ProductType, &RecordId::from("T1")));
        assert!(row.refers_to(EntityKind::Catalog, &RecordId::from("C1")));
        // blank album id is not a reference
        assert_eq!(row.refs.len(), 2);
    }

    #[test]
    fn malformed_rows_are_dropped_from_the_collection() {
        let values = vec![
            json!({"stock_id": "S1", "stock_cantidad": "muchos"}),
            json!({"stock_id": "S2", "producto_id": "P1", "stock_cantidad": 3}),
        ];
        assert!(reference_row(EntityKind::Stock, &values[0]).is_none());
        let rows = reference_rows(EntityKind::Stock, values);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id.as_str(), "S2");
    }

    #[test]
    fn names_from_rows() {
        let rows = reference_rows(
            EntityKind::Artist,
            vec![json!({"artista_id": "AR1", "artista_nombre": "Madonna"})],
        );
        let mut names = RelatedNames::new();
        names.insert_rows(EntityKind::Artist, &rows);
        assert_eq!(names.name_of(EntityKind::Artist, &RecordId::from("AR1")), Some("Madonna"));
        assert_eq!(rows[0].status, RecordStatus::Active);
    }

    #[test]
    fn id_fields_match_the_form_id_field() {
        for kind in EntityKind::all() {
            let form_id = match kind {
                EntityKind::Artist => Artist::form_fields(),
                EntityKind::Album => Album::form_fields(),
                EntityKind::Catalog => Catalog::form_fields(),
                EntityKind::ProductType => ProductType::form_fields(),
                EntityKind::Product => Product::form_fields(),
                EntityKind::Supplier => Supplier::form_fields(),
                EntityKind::Building => Building::form_fields(),
                EntityKind::Location => Location::form_fields(),
                EntityKind::Stock => Stock::form_fields(),
                EntityKind::Inventory => Inventory::form_fields(),
            }
            .iter()
            .find(|field| field.kind == FieldKind::Id)
            .map(|field| field.key);
            assert_eq!(form_id, Some(id_field(kind)), "{kind}");
        }
    }

    #[test]
    fn record_ids_read_numbers_and_strings() {
        let numeric = json!({"ubicacion_id": 7, "edificio_id": "7"});
        assert_eq!(record_id_of(EntityKind::Location, &numeric), Some(RecordId::from("7")));
        assert_eq!(record_id_of(EntityKind::Building, &numeric), Some(RecordId::from("7")));
        assert_eq!(record_id_of(EntityKind::Stock, &numeric), None);
        assert_eq!(record_id_of(EntityKind::Location, &json!({"ubicacion_id": null})), None);
    }
}
