use contracts::system::auth::{authenticate, SessionUser, UserAccount, CONNECTION_FAILED, INVALID_CREDENTIALS};
use gloo_net::http::Request;

use crate::shared::config::config;

/// Fetch the users collection
pub async fn fetch_users() -> Result<Vec<UserAccount>, String> {
    let url = &config().auth.users_url;
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Users request failed: {}", response.status()));
    }

    response
        .json::<Vec<UserAccount>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Вход по email и паролю; ошибка уже в виде текста для формы
pub async fn login(email: &str, password: &str) -> Result<SessionUser, String> {
    let users = fetch_users().await.map_err(|e| {
        log::error!("login: {e}");
        CONNECTION_FAILED.to_string()
    })?;
    authenticate(&users, email, password).ok_or_else(|| INVALID_CREDENTIALS.to_string())
}
