use serde::{Deserialize, Serialize};

/// Учётная запись из коллекции `usuarios`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(rename = "usuario_id", default)]
    pub id: crate::domain::common::RecordId,

    #[serde(rename = "usuario_nombre", default)]
    pub name: String,

    #[serde(rename = "usuario_email", default)]
    pub email: String,

    #[serde(rename = "usuario_contrasena", default)]
    pub password: String,
}

/// Отметка сессии в localStorage; пароль сюда не попадает
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl SessionUser {
    /// Имя для шапки; без имени показываем email
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

impl From<&UserAccount> for SessionUser {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name.clone(),
            email: account.email.clone(),
        }
    }
}

pub const INVALID_CREDENTIALS: &str = "Correo electrónico o contraseña inválidos";
pub const CONNECTION_FAILED: &str = "Error al conectar con el servidor. Por favor, intenta de nuevo.";

/// Email сравнивается без учёта регистра и пробелов по краям, пароль точно
pub fn authenticate(users: &[UserAccount], email: &str, password: &str) -> Option<SessionUser> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return None;
    }
    users
        .iter()
        .find(|user| user.email.trim().eq_ignore_ascii_case(email) && user.password == password)
        .map(SessionUser::from)
}
