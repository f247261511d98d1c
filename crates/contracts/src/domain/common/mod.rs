//! Common types and traits for all entities

pub mod catalog_entity;
pub mod entity_kind;
pub mod lenient;
pub mod record_id;
pub mod status;

// Re-exports
pub use catalog_entity::{cell_text, CatalogEntity, CellSource, ColumnDef};
pub use entity_kind::{Capabilities, EntityKind};
pub use record_id::RecordId;
pub use status::{RecordStatus, StatusFilter};
