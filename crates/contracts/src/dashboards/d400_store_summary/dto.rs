use crate::domain::common::EntityKind;
use serde::{Deserialize, Serialize};

/// Counters for one entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCount {
    pub kind: EntityKind,
    /// All records, any status
    pub total: usize,
    /// Records with status `A`
    pub active: usize,
    /// The read failed; counters are zero
    pub failed: bool,
}

impl EntityCount {
    pub fn empty(kind: EntityKind) -> Self {
        Self { kind, total: 0, active: 0, failed: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// One bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), points: Vec::new() }
    }

    /// Largest value, used to scale the bars
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Сводка для главной панели
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub counts: Vec<EntityCount>,
    /// Stock quantity summed per product
    pub stock_by_product: ChartSeries,
    /// Active vs. inactive suppliers
    pub supplier_status: ChartSeries,
}

impl StoreSummary {
    pub fn count(&self, kind: EntityKind) -> Option<&EntityCount> {
        self.counts.iter().find(|c| c.kind == kind)
    }

    pub fn failed_kinds(&self) -> Vec<EntityKind> {
        self.counts.iter().filter(|c| c.failed).map(|c| c.kind).collect()
    }
}
