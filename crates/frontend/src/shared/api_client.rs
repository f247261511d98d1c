//! HTTP-реализация [`EntityApi`] поверх gloo-net.

use crate::shared::config::config;
use async_trait::async_trait;
use contracts::domain::common::{EntityKind, RecordId, RecordStatus};
use contracts::shared::api::{ensure_supported, ApiError, EntityApi, Operation};
use gloo_net::http::{Request, Response};
use serde_json::Value;

/// Клиент ресурсов `/api/{resource}/`
#[derive(Debug, Clone)]
pub struct HttpEntityApi {
    api_root: String,
}

impl HttpEntityApi {
    pub fn new(api_root: impl Into<String>) -> Self {
        Self { api_root: api_root.into() }
    }

    pub fn from_config() -> Self {
        Self::new(config().api_root())
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/{}/", self.api_root, kind.resource())
    }

    fn item_url(&self, kind: EntityKind, id: &RecordId) -> String {
        format!("{}/{}/{}", self.api_root, kind.resource(), urlencoding::encode(id.as_str()))
    }
}

fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

async fn rejected(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::from_response(status, &body)
}

// Empty bodies (204, or 200 with nothing) decode as `null`.
async fn json_body(response: Response) -> Result<Value, ApiError> {
    let text = response.text().await.map_err(transport)?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl EntityApi for HttpEntityApi {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, ApiError> {
        let response = Request::get(&self.collection_url(kind))
            .send()
            .await
            .map_err(transport)?;
        if !response.ok() {
            return Err(rejected(response).await);
        }
        match json_body(response).await? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(ApiError::Decode(format!("se esperaba una lista de {kind}, llegó {other}"))),
        }
    }

    async fn get(&self, kind: EntityKind, id: &RecordId) -> Result<Option<Value>, ApiError> {
        let response = Request::get(&self.item_url(kind, id))
            .send()
            .await
            .map_err(transport)?;
        if response.status() == 404 {
            return Ok(None);
        }
        if !response.ok() {
            return Err(rejected(response).await);
        }
        json_body(response).await.map(Some)
    }

    async fn create(&self, kind: EntityKind, body: &Value) -> Result<Value, ApiError> {
        let response = Request::post(&self.collection_url(kind))
            .json(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        if !response.ok() {
            return Err(rejected(response).await);
        }
        json_body(response).await
    }

    async fn update(&self, kind: EntityKind, id: &RecordId, body: &Value) -> Result<Value, ApiError> {
        let response = Request::put(&self.item_url(kind, id))
            .json(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        if !response.ok() {
            return Err(rejected(response).await);
        }
        json_body(response).await
    }

    async fn set_status(&self, kind: EntityKind, id: &RecordId, status: RecordStatus) -> Result<(), ApiError> {
        ensure_supported(kind, Operation::SetStatus)?;
        let action = if status.is_active() { "activar" } else { "desactivar" };
        let url = format!("{}/{action}", self.item_url(kind, id));
        let response = Request::put(&url).send().await.map_err(transport)?;
        if !response.ok() {
            return Err(rejected(response).await);
        }
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: &RecordId) -> Result<(), ApiError> {
        ensure_supported(kind, Operation::Delete)?;
        let response = Request::delete(&self.item_url(kind, id))
            .send()
            .await
            .map_err(transport)?;
        if !response.ok() {
            return Err(rejected(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_per_resource_and_encoded() {
        let api = HttpEntityApi::new("http://localhost:8000/api");
        assert_eq!(api.collection_url(EntityKind::ProductType), "http://localhost:8000/api/tipos-producto/");
        assert_eq!(
            api.item_url(EntityKind::Album, &RecordId::from("A 1/2")),
            "http://localhost:8000/api/albumes/A%201%2F2"
        );
    }
}
