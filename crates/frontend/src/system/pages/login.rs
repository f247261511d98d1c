use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;
use crate::system::auth::{api, context::use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let failure = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        failure.set(None);

        let (email, password) = (email.get_untracked(), password.get_untracked());
        spawn_local(async move {
            let outcome = api::login(&email, &password).await;
            pending.set(false);
            match outcome {
                // AppRoutes переключится на основной экран
                Ok(user) => auth.login(user),
                Err(message) => {
                    log::warn!("login rejected for {email}: {message}");
                    failure.set(Some(message));
                }
            }
        });
    };

    let text_input = move |id: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <input
                type=kind
                id=id
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                required
                disabled=move || pending.get()
            />
        }
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <div class="login-box__brand">{icon("music")}</div>
                <h1>"Tienda Música"</h1>
                <h2>"Iniciar sesión"</h2>

                {move || failure.get().map(|message| view! {
                    <div class="error-message">{message}</div>
                })}

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Correo electrónico"</label>
                        {text_input("email", "email", email)}
                    </div>
                    <div class="form-group">
                        <label for="password">"Contraseña"</label>
                        {text_input("password", "password", password)}
                    </div>
                    <button type="submit" class="btn-primary" disabled=move || pending.get()>
                        {move || if pending.get() { "Ingresando..." } else { "Ingresar" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
