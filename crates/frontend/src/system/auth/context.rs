use contracts::system::auth::SessionUser;
use leptos::prelude::*;

use super::storage;

/// Текущая сессия, передаётся через контекст Leptos
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub user: RwSignal<Option<SessionUser>>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn login(&self, user: SessionUser) {
        log::info!("session started for {}", user.email);
        storage::save_session(&user);
        self.user.set(Some(user));
    }

    pub fn logout(&self) {
        storage::clear_session();
        self.user.set(None);
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    provide_context(AuthContext {
        user: RwSignal::new(storage::load_session()),
    });

    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}
