use contracts::system::auth::SessionUser;
use web_sys::window;

const SESSION_KEY: &str = "user";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save the session marker to localStorage
pub fn save_session(user: &SessionUser) {
    let Ok(json) = serde_json::to_string(user) else {
        return;
    };
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(SESSION_KEY, &json);
    }
}

/// Восстановить сессию; повреждённая запись считается отсутствующей
pub fn load_session() -> Option<SessionUser> {
    let raw = get_local_storage()?.get_item(SESSION_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("stored session is unreadable: {e}");
            clear_session();
            None
        }
    }
}

pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}
