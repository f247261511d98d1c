use super::dto::{ChartPoint, ChartSeries, EntityCount, StoreSummary};
use crate::domain::a009_stock::aggregate::Stock;
use crate::domain::common::{EntityKind, RecordId};
use crate::domain::registry::{reference_rows, ReferenceRow};
use crate::shared::api::{decode_list, ApiError, EntityApi};
use futures::future::join_all;
use serde_json::Value;
use std::collections::HashMap;

/// Типы, которые считает панель, в порядке карточек
pub const TRACKED_KINDS: [EntityKind; 8] = [
    EntityKind::Product,
    EntityKind::Supplier,
    EntityKind::Album,
    EntityKind::Artist,
    EntityKind::Location,
    EntityKind::Building,
    EntityKind::Inventory,
    EntityKind::Stock,
];

/// Параллельно читает все коллекции и сводит их.
///
/// A failed read does not fail the summary: the kind shows zero counts.
pub async fn load_store_summary(api: &dyn EntityApi) -> StoreSummary {
    let responses = join_all(TRACKED_KINDS.iter().map(|kind| api.list(*kind))).await;
    summarize(TRACKED_KINDS.iter().copied().zip(responses).collect())
}

pub fn summarize(responses: Vec<(EntityKind, Result<Vec<Value>, ApiError>)>) -> StoreSummary {
    let mut counts = Vec::with_capacity(responses.len());
    let mut rows_by_kind: HashMap<EntityKind, Vec<ReferenceRow>> = HashMap::new();
    let mut stock_values = Vec::new();

    for (kind, response) in responses {
        let values = match response {
            Ok(values) => values,
            Err(e) => {
                log::warn!("dashboard: no se pudo cargar {}: {e}", kind.list_name());
                counts.push(EntityCount::empty(kind));
                continue;
            }
        };
        if kind == EntityKind::Stock {
            stock_values = values.clone();
        }
        let rows = reference_rows(kind, values);
        counts.push(EntityCount {
            kind,
            total: rows.len(),
            active: rows.iter().filter(|r| r.status.is_active()).count(),
            failed: false,
        });
        rows_by_kind.insert(kind, rows);
    }

    let product_names: HashMap<RecordId, String> = rows_by_kind
        .get(&EntityKind::Product)
        .map(|rows| rows.iter().map(|r| (r.id.clone(), r.name.clone())).collect())
        .unwrap_or_default();

    StoreSummary {
        counts,
        stock_by_product: stock_by_product(stock_values, &product_names),
        supplier_status: supplier_status(rows_by_kind.get(&EntityKind::Supplier)),
    }
}

fn stock_by_product(values: Vec<Value>, product_names: &HashMap<RecordId, String>) -> ChartSeries {
    let mut series = ChartSeries::new("Stock por producto");
    let stocks = decode_list::<Stock>(values);

    // first-seen order
    let mut order: Vec<RecordId> = Vec::new();
    let mut totals: HashMap<RecordId, i64> = HashMap::new();
    for stock in stocks {
        if !totals.contains_key(&stock.product_id) {
            order.push(stock.product_id.clone());
        }
        *totals.entry(stock.product_id).or_insert(0) += stock.quantity;
    }

    series.points = order
        .into_iter()
        .map(|id| {
            let value = totals.get(&id).copied().unwrap_or(0) as f64;
            let label = product_names
                .get(&id)
                .filter(|name| !name.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| id.to_string());
            ChartPoint { label, value }
        })
        .collect();
    series
}

fn supplier_status(rows: Option<&Vec<ReferenceRow>>) -> ChartSeries {
    let mut series = ChartSeries::new("Proveedores por estado");
    if let Some(rows) = rows {
        let active = rows.iter().filter(|r| r.status.is_active()).count();
        series.points = vec![
            ChartPoint { label: "Activos".into(), value: active as f64 },
            ChartPoint { label: "Inactivos".into(), value: (rows.len() - active) as f64 },
        ];
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::{Call, MockApi};
    use serde_json::json;

    fn api() -> MockApi {
        MockApi::new()
            .with_collection(
                EntityKind::Product,
                vec![
                    json!({"producto_id": "P1", "producto_nombre": "Thriller LP", "tipo_id": "T1", "catalogo_id": "C1", "producto_precio": 20, "producto_status": "A"}),
                    json!({"producto_id": "P2", "producto_nombre": "Bad CD", "tipo_id": "T1", "catalogo_id": "C1", "producto_precio": 12, "producto_status": "I"}),
                ],
            )
            .with_collection(
                EntityKind::Stock,
                vec![
                    json!({"stock_id": "S1", "producto_id": "P1", "stock_cantidad": 5}),
                    json!({"stock_id": "S2", "producto_id": "P9", "stock_cantidad": "2"}),
                    json!({"stock_id": "S3", "producto_id": "P1", "stock_cantidad": 4}),
                ],
            )
            .with_collection(
                EntityKind::Supplier,
                vec![
                    json!({"proveedor_id": "PR1", "proveedor_nombre": "Uno", "proveedor_status": "A"}),
                    json!({"proveedor_id": "PR2", "proveedor_nombre": "Dos", "proveedor_status": "I"}),
                    json!({"proveedor_id": "PR3", "proveedor_nombre": "Tres", "proveedor_status": "A"}),
                ],
            )
    }

    #[tokio::test]
    async fn counts_and_charts() {
        let api = api();
        let summary = load_store_summary(&api).await;

        let products = summary.count(EntityKind::Product).unwrap();
        assert_eq!((products.total, products.active), (2, 1));
        assert_eq!(summary.count(EntityKind::Artist).unwrap().total, 0);

        let labels: Vec<_> = summary.stock_by_product.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Thriller LP", "P9"]);
        assert_eq!(summary.stock_by_product.points[0].value, 9.0);
        assert_eq!(summary.stock_by_product.max_value(), 9.0);

        assert_eq!(summary.supplier_status.points[0].value, 2.0);
        assert_eq!(summary.supplier_status.points[1].value, 1.0);

        let reads = api.calls().iter().filter(|c| matches!(c, Call::List(_))).count();
        assert_eq!(reads, TRACKED_KINDS.len());
    }

    #[tokio::test]
    async fn failed_read_renders_as_zero() {
        let api = api().failing(EntityKind::Supplier);
        let summary = load_store_summary(&api).await;

        let suppliers = summary.count(EntityKind::Supplier).unwrap();
        assert!(suppliers.failed);
        assert_eq!(suppliers.total, 0);
        assert!(summary.supplier_status.is_empty());
        assert_eq!(summary.failed_kinds(), vec![EntityKind::Supplier]);
        assert_eq!(summary.count(EntityKind::Product).unwrap().total, 2);
    }
}
