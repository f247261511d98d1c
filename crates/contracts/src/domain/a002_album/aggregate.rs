use crate::domain::common::{CatalogEntity, CellSource, ColumnDef, EntityKind, RecordId, RecordStatus};
use crate::shared::form::FieldDef;
use crate::shared::list_query::{SortOption, TextKey};
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Альбом; единственная сущность, у которой статус меняется отдельной
/// операцией (`activar`/`desactivar`), а не через форму, и которую нельзя удалить
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(rename = "album_id")]
    pub id: RecordId,

    #[serde(rename = "album_nombre", default)]
    pub name: String,

    #[serde(rename = "artista_id", default)]
    pub artist_id: RecordId,

    #[serde(rename = "album_status", default)]
    pub status: RecordStatus,

    #[serde(rename = "album_fecha_modificacion", default, skip_serializing)]
    pub modified_at: Option<String>,
}

// ============================================================================
// Screen configuration
// ============================================================================

const FIELDS: &[FieldDef] = &[
    FieldDef::id("album_id", "ID"),
    FieldDef::text("album_nombre", "Nombre"),
    FieldDef::reference("artista_id", "Artista", EntityKind::Artist),
    FieldDef::status("album_status"),
];

const SORT_OPTIONS: &[SortOption] = &[
    SortOption::asc("name_asc", "Nombre A-Z", TextKey::Name),
    SortOption::desc("name_desc", "Nombre Z-A", TextKey::Name),
    SortOption::asc("artist_asc", "Artista A-Z", TextKey::Related(EntityKind::Artist)),
    SortOption::desc("artist_desc", "Artista Z-A", TextKey::Related(EntityKind::Artist)),
];

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", CellSource::Id),
    ColumnDef::new("Nombre", CellSource::Name),
    ColumnDef::new("Artista", CellSource::Related(EntityKind::Artist)),
    ColumnDef::new("Estado", CellSource::Status),
    ColumnDef::new("Última modificación", CellSource::ModifiedAt),
];

impl CatalogEntity for Album {
    const KIND: EntityKind = EntityKind::Album;
    const ID_FIELD: &'static str = "album_id";
    const STATUS_FIELD: &'static str = "album_status";

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
            EntityKind::Artist => Some(&self.artist_id),
            _ => None,
        }
    }

    fn form_fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn search_keys() -> &'static [TextKey] {
        &[TextKey::Name, TextKey::Related(EntityKind::Artist)]
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
    fn artist_column_uses_related_name() {
        let album: Album = serde_json::from_str(
            r#"{"album_id": "A1", "album_nombre": "Thriller", "artista_id": "AR1", "album_status": "I"}"#,
        )
        .unwrap();
        let mut names = RelatedNames::new();
        assert_eq!(cell_text(&album, CellSource::Related(EntityKind::Artist), &names), "Sin artista");
        names.insert(EntityKind::Artist, RecordId::from("AR1"), "Michael Jackson");
        assert_eq!(cell_text(&album, CellSource::Related(EntityKind::Artist), &names), "Michael Jackson");
        assert_eq!(cell_text(&album, CellSource::Status, &names), "Inactivo");
        assert_eq!(Album::related_kinds(), vec![EntityKind::Artist]);
    }
}
