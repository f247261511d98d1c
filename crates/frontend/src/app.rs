use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::notifications::{NotificationService, Toasts};
use crate::shared::theme::ThemeProvider;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(NotificationService::new());

    view! {
        <ConfigProvider>
            <ThemeProvider>
                <AuthProvider>
                    <AppRoutes />
                    <Toasts />
                </AuthProvider>
            </ThemeProvider>
        </ConfigProvider>
    }
}
