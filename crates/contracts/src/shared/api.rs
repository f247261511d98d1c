//! Клиент удалённых коллекций.
//!
//! The trait works on raw JSON so one implementation serves every entity type;
//! typed helpers below decode into concrete entities.

use crate::domain::common::{CatalogEntity, EntityKind, RecordId, RecordStatus};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Операция над ресурсом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    SetStatus,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::List => "listar",
            Operation::Get => "consultar",
            Operation::Create => "crear",
            Operation::Update => "actualizar",
            Operation::SetStatus => "cambiar estado",
            Operation::Delete => "eliminar",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Error al conectar con el servidor: {0}")]
    Transport(String),

    #[error("{message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    #[error("La operación \"{operation}\" no está disponible para {kind}")]
    Unsupported { kind: EntityKind, operation: Operation },
}

impl ApiError {
    /// Разбор тела ошибки: `detail`, `message` или `error`, плюс `code`
    pub fn from_response(status: u16, body: &str) -> Self {
        let fallback = || format!("Error del servidor (HTTP {status})");
        let json: Value = match serde_json::from_str(body) {
            Ok(json) => json,
            Err(_) => {
                let text = body.trim();
                return ApiError::Rejected {
                    status,
                    code: None,
                    message: if text.is_empty() || text.starts_with('<') {
                        fallback()
                    } else {
                        text.to_string()
                    },
                };
            }
        };

        let message = ["detail", "message", "error"]
            .iter()
            .find_map(|key| json.get(*key).and_then(message_text))
            .unwrap_or_else(fallback);
        let code = json.get("code").and_then(|code| match code {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        ApiError::Rejected { status, code, message }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 404, .. })
    }
}

// Validation failures come back as a list of {"msg": ...} objects.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

/// Проверка, что тип сущности поддерживает операцию
pub fn ensure_supported(kind: EntityKind, operation: Operation) -> Result<(), ApiError> {
    let capabilities = kind.capabilities();
    let supported = match operation {
        Operation::SetStatus => capabilities.status_toggle,
        Operation::Delete => capabilities.delete,
        _ => true,
    };
    if supported {
        Ok(())
    } else {
        Err(ApiError::Unsupported { kind, operation })
    }
}

/// Доступ к ресурсам `/{resource}/`
#[async_trait(?Send)]
pub trait EntityApi {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, ApiError>;

    /// `Ok(None)` на 404
    async fn get(&self, kind: EntityKind, id: &RecordId) -> Result<Option<Value>, ApiError>;

    async fn create(&self, kind: EntityKind, body: &Value) -> Result<Value, ApiError>;

    async fn update(&self, kind: EntityKind, id: &RecordId, body: &Value) -> Result<Value, ApiError>;

    /// `activar` / `desactivar`
    async fn set_status(&self, kind: EntityKind, id: &RecordId, status: RecordStatus) -> Result<(), ApiError>;

    async fn delete(&self, kind: EntityKind, id: &RecordId) -> Result<(), ApiError>;
}

/// Декодирует коллекцию; испорченные записи пропускаются с предупреждением
pub fn decode_list<E: CatalogEntity>(values: Vec<Value>) -> Vec<E> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("{}: registro #{index} omitido: {e}", E::KIND);
                None
            }
        })
        .collect()
}

pub async fn fetch_all<E: CatalogEntity>(api: &dyn EntityApi) -> Result<Vec<E>, ApiError> {
    Ok(decode_list(api.list(E::KIND).await?))
}

pub async fn fetch_one<E: CatalogEntity>(api: &dyn EntityApi, id: &RecordId) -> Result<Option<E>, ApiError> {
    match api.get(E::KIND, id).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ApiError::Decode(format!("{}: {e}", E::KIND))),
        None => Ok(None),
    }
}

pub async fn change_status<E: CatalogEntity>(
    api: &dyn EntityApi,
    id: &RecordId,
    status: RecordStatus,
) -> Result<(), ApiError> {
    ensure_supported(E::KIND, Operation::SetStatus)?;
    api.set_status(E::KIND, id, status).await
}

pub async fn remove<E: CatalogEntity>(api: &dyn EntityApi, id: &RecordId) -> Result<(), ApiError> {
    ensure_supported(E::KIND, Operation::Delete)?;
    api.delete(E::KIND, id).await
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::domain::registry::record_id_of;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        List(EntityKind),
        Get(EntityKind, RecordId),
        Create(EntityKind),
        Update(EntityKind, RecordId),
        SetStatus(EntityKind, RecordId, RecordStatus),
        Delete(EntityKind, RecordId),
    }

    /// Коллекции в памяти; записывает все вызовы
    #[derive(Default)]
    pub struct MockApi {
        collections: RefCell<HashMap<EntityKind, Vec<Value>>>,
        failing: HashSet<EntityKind>,
        write_error: Option<ApiError>,
        calls: RefCell<Vec<Call>>,
    }

    impl MockApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_collection(self, kind: EntityKind, items: Vec<Value>) -> Self {
            self.collections.borrow_mut().insert(kind, items);
            self
        }

        pub fn failing(mut self, kind: EntityKind) -> Self {
            self.failing.insert(kind);
            self
        }

        pub fn rejecting_writes(mut self, error: ApiError) -> Self {
            self.write_error = Some(error);
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        pub fn collection(&self, kind: EntityKind) -> Vec<Value> {
            self.collections.borrow().get(&kind).cloned().unwrap_or_default()
        }

        fn record(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }

        fn write_result(&self) -> Result<(), ApiError> {
            match &self.write_error {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl EntityApi for MockApi {
        async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, ApiError> {
            self.record(Call::List(kind));
            if self.failing.contains(&kind) {
                return Err(ApiError::Transport("connection refused".into()));
            }
            Ok(self.collection(kind))
        }

        async fn get(&self, kind: EntityKind, id: &RecordId) -> Result<Option<Value>, ApiError> {
            self.record(Call::Get(kind, id.clone()));
            Ok(self
                .collection(kind)
                .into_iter()
                .find(|item| record_id_of(kind, item).as_ref() == Some(id)))
        }

        async fn create(&self, kind: EntityKind, body: &Value) -> Result<Value, ApiError> {
            self.record(Call::Create(kind));
            self.write_result()?;
            self.collections.borrow_mut().entry(kind).or_default().push(body.clone());
            Ok(body.clone())
        }

        async fn update(&self, kind: EntityKind, id: &RecordId, body: &Value) -> Result<Value, ApiError> {
            self.record(Call::Update(kind, id.clone()));
            self.write_result()?;
            Ok(body.clone())
        }

        async fn set_status(&self, kind: EntityKind, id: &RecordId, status: RecordStatus) -> Result<(), ApiError> {
            self.record(Call::SetStatus(kind, id.clone(), status));
            self.write_result()
        }

        async fn delete(&self, kind: EntityKind, id: &RecordId) -> Result<(), ApiError> {
            self.record(Call::Delete(kind, id.clone()));
            self.write_result()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{Call, MockApi};
    use super::*;
    use crate::domain::a001_artist::aggregate::Artist;
    use crate::domain::a002_album::aggregate::Album;
    use serde_json::json;

    #[test]
    fn parses_error_bodies() {
        let detail = ApiError::from_response(400, r#"{"detail": "Artista no encontrado"}"#);
        assert_eq!(detail.to_string(), "Artista no encontrado");

        let coded = ApiError::from_response(409, r#"{"message": "ID duplicado", "code": "DUP"}"#);
        assert_eq!(
            coded,
            ApiError::Rejected { status: 409, code: Some("DUP".into()), message: "ID duplicado".into() }
        );

        let list = ApiError::from_response(422, r#"{"detail": [{"msg": "campo requerido"}, {"msg": "valor inválido"}]}"#);
        assert_eq!(list.to_string(), "campo requerido; valor inválido");

        let html = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(html.to_string(), "Error del servidor (HTTP 502)");
        assert!(ApiError::from_response(404, "").is_not_found());
    }

    #[tokio::test]
    async fn unsupported_operations_make_no_call() {
        let api = MockApi::new();
        let err = remove::<Album>(&api, &RecordId::from("A1")).await.unwrap_err();
        assert!(matches!(err, ApiError::Unsupported { kind: EntityKind::Album, operation: Operation::Delete }));

        let err = change_status::<Artist>(&api, &RecordId::from("AR1"), RecordStatus::Inactive)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unsupported { operation: Operation::SetStatus, .. }));
        assert!(api.calls().is_empty());

        change_status::<Album>(&api, &RecordId::from("A1"), RecordStatus::Inactive)
            .await
            .unwrap();
        assert_eq!(
            api.calls(),
            vec![Call::SetStatus(EntityKind::Album, RecordId::from("A1"), RecordStatus::Inactive)]
        );
    }

    #[tokio::test]
    async fn fetch_all_decodes_numeric_ids() {
        let api = MockApi::new().with_collection(
            EntityKind::Artist,
            vec![json!({"artista_id": 7, "artista_nombre": "Shakira", "artista_status": "A"})],
        );
        let artists = fetch_all::<Artist>(&api).await.unwrap();
        assert_eq!(artists[0].id.as_str(), "7");
    }

    #[tokio::test]
    async fn fetch_one_reports_missing_records() {
        let api = MockApi::new().with_collection(
            EntityKind::Artist,
            vec![json!({"artista_id": "AR1", "artista_nombre": "Soda Stereo", "artista_status": "A"})],
        );
        let found = fetch_one::<Artist>(&api, &RecordId::from("AR1")).await.unwrap();
        assert_eq!(found.map(|a| a.display_name().to_string()), Some("Soda Stereo".to_string()));

        let missing = fetch_one::<Artist>(&api, &RecordId::from("AR9")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn fetch_one_matches_numeric_ids() {
        let api = MockApi::new().with_collection(
            EntityKind::Album,
            vec![json!({"album_id": 12, "album_nombre": "El Dorado", "artista_id": 3, "album_status": "A"})],
        );
        let album = fetch_one::<Album>(&api, &RecordId::from("12")).await.unwrap();
        assert_eq!(album.map(|a| a.name), Some("El Dorado".to_string()));
        // a foreign key with the same value is not the record id
        assert!(fetch_one::<Album>(&api, &RecordId::from("3")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_rows_are_skipped() {
        use crate::domain::a009_stock::aggregate::Stock;

        let api = MockApi::new().with_collection(
            EntityKind::Stock,
            vec![
                json!({"stock_id": "S1", "producto_id": "P1", "stock_cantidad": 2.5, "stock_status": "A"}),
                json!({"stock_id": "S2", "producto_id": "P1", "stock_cantidad": 4, "stock_status": "A"}),
            ],
        );
        let stocks = fetch_all::<Stock>(&api).await.unwrap();
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].id.as_str(), "S2");
    }
}
