use crate::domain::common::{CatalogEntity, CellSource, ColumnDef, EntityKind, RecordId, RecordStatus};
use crate::shared::form::FieldDef;
use crate::shared::list_query::{SortOption, TextKey};
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Артист (исполнитель)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(rename = "artista_id")]
    pub id: RecordId,

    #[serde(rename = "artista_nombre", default)]
    pub name: String,

    #[serde(rename = "artista_status", default)]
    pub status: RecordStatus,

    #[serde(rename = "artista_fecha_modificacion", default, skip_serializing)]
    pub modified_at: Option<String>,
}

// ============================================================================
// Screen configuration
// ============================================================================

const FIELDS: &[FieldDef] = &[
    FieldDef::id("artista_id", "ID"),
    FieldDef::text("artista_nombre", "Nombre"),
    FieldDef::status("artista_status"),
];

const SORT_OPTIONS: &[SortOption] = &[
    SortOption::asc("name_asc", "Nombre A-Z", TextKey::Name),
    SortOption::desc("name_desc", "Nombre Z-A", TextKey::Name),
    SortOption::asc("id_asc", "ID ascendente", TextKey::Id),
];

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", CellSource::Id),
    ColumnDef::new("Nombre", CellSource::Name),
    ColumnDef::new("Estado", CellSource::Status),
];

impl CatalogEntity for Artist {
    const KIND: EntityKind = EntityKind::Artist;
    const ID_FIELD: &'static str = "artista_id";
    const STATUS_FIELD: &'static str = "artista_status";

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_active_and_date_is_read_only() {
        let artist: Artist = serde_json::from_str(
            r#"{"artista_id": "AR1", "artista_nombre": "Soda Stereo", "artista_fecha_modificacion": "2024-03-01T12:00:00"}"#,
        )
        .unwrap();
        assert_eq!(artist.status, RecordStatus::Active);
        assert_eq!(artist.modified_at(), Some("2024-03-01T12:00:00"));

        let json = serde_json::to_value(&artist).unwrap();
        assert!(json.get("artista_fecha_modificacion").is_none());
        assert_eq!(json["artista_status"], "A");
    }
}
