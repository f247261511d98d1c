//! Проверка ссылочной целостности перед деактивацией и удалением.

use crate::domain::common::{EntityKind, RecordId, RecordStatus};
use crate::domain::registry::{record_id_of, reference_row, ReferenceRow};
use crate::shared::api::{ApiError, EntityApi};
use futures::future::join_all;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Связь: записи `source` ссылаются на `target` через `foreign_key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub target: EntityKind,
    pub source: EntityKind,
    pub foreign_key: &'static str,
}

pub const RELATIONS: &[Relation] = &[
    Relation { target: EntityKind::Artist, source: EntityKind::Album, foreign_key: "artista_id" },
    Relation { target: EntityKind::Album, source: EntityKind::Product, foreign_key: "album_id" },
    Relation { target: EntityKind::Catalog, source: EntityKind::Product, foreign_key: "catalogo_id" },
    Relation { target: EntityKind::ProductType, source: EntityKind::Product, foreign_key: "tipo_id" },
    Relation { target: EntityKind::Product, source: EntityKind::Stock, foreign_key: "producto_id" },
    Relation { target: EntityKind::Product, source: EntityKind::Inventory, foreign_key: "producto_id" },
    Relation { target: EntityKind::Building, source: EntityKind::Location, foreign_key: "edificio_id" },
    Relation { target: EntityKind::Location, source: EntityKind::Inventory, foreign_key: "ubicacion_id" },
    Relation { target: EntityKind::Stock, source: EntityKind::Inventory, foreign_key: "stock_id" },
];

pub fn relations_for(target: EntityKind) -> impl Iterator<Item = &'static Relation> {
    RELATIONS.iter().filter(move |relation| relation.target == target)
}

/// Коллекции, которые нужно загрузить для проверки `target`
pub fn required_kinds(target: EntityKind) -> Vec<EntityKind> {
    let mut kinds: Vec<EntityKind> = Vec::new();
    for relation in relations_for(target) {
        if !kinds.contains(&relation.source) {
            kinds.push(relation.source);
        }
    }
    kinds
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    Deactivate,
    Delete,
}

impl MutationAction {
    pub fn verb(&self) -> &'static str {
        match self {
            MutationAction::Deactivate => "desactivar",
            MutationAction::Delete => "eliminar",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardVerdict {
    Allowed,
    Blocked { relation: Relation, reason: String },
}

impl GuardVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardVerdict::Allowed)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GuardError {
    #[error("no se cargó la colección de {0}")]
    MissingCollection(EntityKind),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Загруженные ссылающиеся коллекции
#[derive(Debug, Clone, Default)]
pub struct RelatedCollections {
    rows: HashMap<EntityKind, Vec<ReferenceRow>>,
}

impl RelatedCollections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: EntityKind, rows: Vec<ReferenceRow>) {
        self.rows.insert(kind, rows);
    }

    pub fn get(&self, kind: EntityKind) -> Option<&[ReferenceRow]> {
        self.rows.get(&kind).map(Vec::as_slice)
    }
}

/// Any referencing record blocks, whatever its own status.
pub fn can_mutate(
    action: MutationAction,
    kind: EntityKind,
    id: &RecordId,
    related: &RelatedCollections,
) -> Result<GuardVerdict, GuardError> {
    for relation in relations_for(kind) {
        let rows = related
            .get(relation.source)
            .ok_or(GuardError::MissingCollection(relation.source))?;
        if let Some(row) = rows.iter().find(|row| row.refers_to(kind, id)) {
            let reason = format!(
                "No se puede {} {} porque está asociado a {} ({}).",
                action.verb(),
                kind.element_name(),
                relation.source.indefinite_name(),
                row.name,
            );
            return Ok(GuardVerdict::Blocked { relation: *relation, reason });
        }
    }
    Ok(GuardVerdict::Allowed)
}

/// Загружает ссылающиеся коллекции и вызывает [`can_mutate`].
///
/// Not atomic: a referencing record created between the fetch and the write
/// is missed. Each check downloads the full referencing collections.
pub struct IntegrityGuard<'a> {
    api: &'a dyn EntityApi,
}

impl<'a> IntegrityGuard<'a> {
    pub fn new(api: &'a dyn EntityApi) -> Self {
        Self { api }
    }

    pub async fn check(
        &self,
        action: MutationAction,
        kind: EntityKind,
        id: &RecordId,
    ) -> Result<GuardVerdict, GuardError> {
        let kinds = required_kinds(kind);
        let responses = join_all(kinds.iter().map(|source| self.api.list(*source))).await;

        let mut related = RelatedCollections::new();
        for (source, response) in kinds.into_iter().zip(responses) {
            related.insert(source, scan_rows(source, &response?));
        }

        let verdict = can_mutate(action, kind, id, &related)?;
        if let GuardVerdict::Blocked { relation, .. } = &verdict {
            log::debug!("{kind} {id}: {} bloqueado por {}.{}", action.verb(), relation.source, relation.foreign_key);
        }
        Ok(verdict)
    }
}

/// Строки для проверки связей.
///
/// A record that fails to decode is still scanned through its raw foreign
/// keys, so a malformed row can never hide a reference.
fn scan_rows(source: EntityKind, values: &[Value]) -> Vec<ReferenceRow> {
    values
        .iter()
        .map(|value| {
            reference_row(source, value).unwrap_or_else(|| {
                log::warn!("{source}: registro no decodificable, se revisan sus claves en bruto");
                raw_row(source, value)
            })
        })
        .collect()
}

fn raw_row(source: EntityKind, value: &Value) -> ReferenceRow {
    let id = record_id_of(source, value).unwrap_or_default();
    let refs = RELATIONS
        .iter()
        .filter(|relation| relation.source == source)
        .filter_map(|relation| {
            let target = value.get(relation.foreign_key)?;
            let target = RecordId::deserialize(target).ok()?;
            (!target.is_blank()).then_some((relation.target, target))
        })
        .collect();
    ReferenceRow {
        name: id.to_string(),
        id,
        status: RecordStatus::default(),
        refs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registry::id_field;
    use crate::shared::api::mock::{Call, MockApi};
    use serde_json::{json, Map};

    fn album_row(id: &str, artist: &str, status: RecordStatus) -> ReferenceRow {
        ReferenceRow {
            id: RecordId::from(id),
            name: format!("Álbum {id}"),
            status,
            refs: vec![(EntityKind::Artist, RecordId::from(artist))],
        }
    }

    #[test]
    fn every_target_has_distinct_sources() {
        assert_eq!(required_kinds(EntityKind::Product), vec![EntityKind::Stock, EntityKind::Inventory]);
        assert_eq!(required_kinds(EntityKind::Inventory), Vec::<EntityKind>::new());
        assert_eq!(RELATIONS.len(), 9);
    }

    #[test]
    fn reference_blocks_and_absence_allows() {
        let mut related = RelatedCollections::new();
        related.insert(EntityKind::Album, vec![album_row("A1", "AR1", RecordStatus::Inactive)]);

        let blocked = can_mutate(MutationAction::Deactivate, EntityKind::Artist, &RecordId::from("AR1"), &related).unwrap();
        match blocked {
            GuardVerdict::Blocked { relation, reason } => {
                assert_eq!(relation.foreign_key, "artista_id");
                assert!(reason.contains("desactivar"));
                assert!(reason.contains("un álbum"));
            }
            GuardVerdict::Allowed => panic!("expected a block"),
        }

        let allowed = can_mutate(MutationAction::Delete, EntityKind::Artist, &RecordId::from("AR2"), &related).unwrap();
        assert!(allowed.is_allowed());
    }

    #[test]
    fn missing_collection_is_an_error() {
        let related = RelatedCollections::new();
        let err = can_mutate(MutationAction::Delete, EntityKind::Product, &RecordId::from("P1"), &related).unwrap_err();
        assert_eq!(err, GuardError::MissingCollection(EntityKind::Stock));
    }

    #[tokio::test]
    async fn product_is_checked_against_stock_and_inventory() {
        let api = MockApi::new()
            .with_collection(EntityKind::Stock, vec![])
            .with_collection(
                EntityKind::Inventory,
                vec![json!({
                    "inventario_id": "I1", "ubicacion_id": "U1", "producto_id": "P1",
                    "stock_id": "S1", "inventario_cantidad": 4, "inventario_status": "A"
                })],
            );
        let verdict = IntegrityGuard::new(&api)
            .check(MutationAction::Delete, EntityKind::Product, &RecordId::from("P1"))
            .await
            .unwrap();
        assert!(!verdict.is_allowed());
        assert_eq!(api.calls(), vec![Call::List(EntityKind::Stock), Call::List(EntityKind::Inventory)]);
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_as_api_error() {
        let api = MockApi::new().failing(EntityKind::Album);
        let err = IntegrityGuard::new(&api)
            .check(MutationAction::Deactivate, EntityKind::Artist, &RecordId::from("AR1"))
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Api(ApiError::Transport(_))));
    }

    fn api_with_source_row(relation: &Relation, row: Value) -> MockApi {
        let mut api = MockApi::new();
        for source in required_kinds(relation.target) {
            let rows = if source == relation.source { vec![row.clone()] } else { Vec::new() };
            api = api.with_collection(source, rows);
        }
        api
    }

    #[tokio::test]
    async fn every_relation_blocks_on_a_match_and_allows_otherwise() {
        let target_id = RecordId::from("X1");
        for relation in RELATIONS {
            for (foreign_id, blocks) in [("X1", true), ("X2", false)] {
                let mut row = Map::new();
                row.insert(id_field(relation.source).to_string(), json!("R1"));
                row.insert(relation.foreign_key.to_string(), json!(foreign_id));
                let api = api_with_source_row(relation, Value::Object(row));

                let verdict = IntegrityGuard::new(&api)
                    .check(MutationAction::Delete, relation.target, &target_id)
                    .await
                    .unwrap();
                match verdict {
                    GuardVerdict::Blocked { relation: blocking, .. } => {
                        assert!(blocks, "{relation:?} blocked on {foreign_id}");
                        assert_eq!(blocking, *relation);
                    }
                    GuardVerdict::Allowed => assert!(!blocks, "{relation:?} allowed on {foreign_id}"),
                }
            }
        }
    }

    #[tokio::test]
    async fn malformed_or_numeric_rows_still_block() {
        let stock_relation = RELATIONS
            .iter()
            .find(|r| r.source == EntityKind::Stock)
            .unwrap();
        let broken = json!({"stock_id": "S1", "producto_id": "P1", "stock_cantidad": 2.5, "stock_status": "A"});
        let api = api_with_source_row(stock_relation, broken);
        let verdict = IntegrityGuard::new(&api)
            .check(MutationAction::Delete, EntityKind::Product, &RecordId::from("P1"))
            .await
            .unwrap();
        assert!(!verdict.is_allowed());

        let api = MockApi::new().with_collection(
            EntityKind::Location,
            vec![json!({"ubicacion_id": 3, "ubicacion_nombre": "Pasillo 3", "edificio_id": 5})],
        );
        let verdict = IntegrityGuard::new(&api)
            .check(MutationAction::Deactivate, EntityKind::Building, &RecordId::from("5"))
            .await
            .unwrap();
        assert!(!verdict.is_allowed());
    }
}
