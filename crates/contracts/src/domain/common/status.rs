use serde::{Deserialize, Serialize};

/// Статус записи: активна (`A`) или неактивна (`I`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RecordStatus {
    #[default]
    #[serde(rename = "A")]
    Active,
    #[serde(rename = "I")]
    Inactive,
}

impl RecordStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            RecordStatus::Active => "A",
            RecordStatus::Inactive => "I",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "A" => Some(RecordStatus::Active),
            "I" => Some(RecordStatus::Inactive),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RecordStatus::Active)
    }

    pub fn toggled(&self) -> Self {
        match self {
            RecordStatus::Active => RecordStatus::Inactive,
            RecordStatus::Inactive => RecordStatus::Active,
        }
    }

    /// Подпись для таблиц и выпадающих списков
    pub fn label(&self) -> &'static str {
        match self {
            RecordStatus::Active => "Activo",
            RecordStatus::Inactive => "Inactivo",
        }
    }
}

/// Фильтр списка по статусу ("Mostrar todos" / "Activos" / "Inactivos")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RecordStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: RecordStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            StatusFilter::All => "todos",
            StatusFilter::Only(status) => status.as_code(),
        }
    }

    pub fn from_key(key: &str) -> Self {
        RecordStatus::from_code(key)
            .map(StatusFilter::Only)
            .unwrap_or(StatusFilter::All)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "Mostrar todos",
            StatusFilter::Only(RecordStatus::Active) => "Activos",
            StatusFilter::Only(RecordStatus::Inactive) => "Inactivos",
        }
    }

    pub fn all() -> [StatusFilter; 3] {
        [
            StatusFilter::All,
            StatusFilter::Only(RecordStatus::Active),
            StatusFilter::Only(RecordStatus::Inactive),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_codes() {
        assert_eq!(serde_json::to_string(&RecordStatus::Active).unwrap(), r#""A""#);
        let parsed: RecordStatus = serde_json::from_str(r#""I""#).unwrap();
        assert_eq!(parsed, RecordStatus::Inactive);
        assert!(serde_json::from_str::<RecordStatus>(r#""X""#).is_err());
    }

    #[test]
    fn filter_keys_round_trip() {
        for filter in StatusFilter::all() {
            assert_eq!(StatusFilter::from_key(filter.as_key()), filter);
        }
        assert!(StatusFilter::All.matches(RecordStatus::Inactive));
        assert!(!StatusFilter::Only(RecordStatus::Active).matches(RecordStatus::Inactive));
    }
}
