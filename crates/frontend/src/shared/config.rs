//! Конфигурация клиента.
//!
//! The embedded default is used until `config.toml`, served next to the
//! bundle, is fetched at start-up. Keys missing from the override keep their
//! default values.

use once_cell::sync::OnceCell;
use serde::Deserialize;

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[api]
# Базовый адрес бэкенда; ресурсы живут под /api/{resource}/
base_url = "http://127.0.0.1:8000"

[auth]
users_url = "http://127.0.0.1:5001/usuarios/api/usuarios"

[list]
page_size = 10
"#;

const OVERRIDE_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub list: ListConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: "http://127.0.0.1:8000".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub users_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { users_url: "http://127.0.0.1:5001/usuarios/api/usuarios".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub page_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self { page_size: contracts::shared::list_query::PAGE_SIZE }
    }
}

impl ClientConfig {
    /// `/api/` на базовом адресе, без завершающего слэша у base_url
    pub fn api_root(&self) -> String {
        format!("{}/api", self.api.base_url.trim_end_matches('/'))
    }

    pub fn page_size(&self) -> usize {
        if self.list.page_size == 0 {
            contracts::shared::list_query::PAGE_SIZE
        } else {
            self.list.page_size
        }
    }
}

pub fn parse_config(text: &str) -> Result<ClientConfig, toml::de::Error> {
    toml::from_str(text)
}

static CONFIG: OnceCell<ClientConfig> = OnceCell::new();

/// Текущая конфигурация (встроенная, если override не загружен)
pub fn config() -> &'static ClientConfig {
    CONFIG.get_or_init(|| {
        parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::error!("embedded config is invalid: {e}");
            ClientConfig::default()
        })
    })
}

/// Загрузить `config.toml`; вызывается один раз до монтирования приложения
pub async fn init_config() {
    let loaded = match fetch_override().await {
        Ok(Some(text)) => match parse_config(&text) {
            Ok(cfg) => {
                log::info!("config: loaded {OVERRIDE_PATH}, api at {}", cfg.api.base_url);
                Some(cfg)
            }
            Err(e) => {
                log::warn!("config: {OVERRIDE_PATH} ignored: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::debug!("config: no override ({e})");
            None
        }
    };
    if let Some(cfg) = loaded {
        if CONFIG.set(cfg).is_err() {
            log::warn!("config: already initialised, override ignored");
        }
    }
}

async fn fetch_override() -> Result<Option<String>, String> {
    let response = gloo_net::http::Request::get(OVERRIDE_PATH)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Ok(None);
    }
    response.text().await.map(Some).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let cfg = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.page_size(), 10);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg = parse_config("[api]\nbase_url = \"https://tienda.example.com/\"\n").unwrap();
        assert_eq!(cfg.api_root(), "https://tienda.example.com/api");
        assert_eq!(cfg.auth, AuthConfig::default());
        assert_eq!(cfg.page_size(), 10);
    }
}
