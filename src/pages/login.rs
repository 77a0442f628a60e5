//! Login page: username + password against `POST /login`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guest-only route. On success the session store persists the token and
//! user and the page moves to the landing route; failures render the store's
//! error message.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::net::types::Credentials;

pub(crate) const MISSING_FIELDS: &str = "Enter both username and password.";

/// Build credentials from raw form input. The username is trimmed; the
/// password is sent as typed.
pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok(Credentials::new(username, password))
}

#[cfg(feature = "csr")]
pub use view::LoginPage;

#[cfg(feature = "csr")]
mod view {
    use leptos::prelude::*;
    use leptos::task::spawn_local;
    use leptos_router::hooks::use_navigate;

    use super::validate_login_input;
    use crate::app::{AppHandle, replace, sync_auth, use_auth};
    use crate::routes::LANDING_PATH;

    #[component]
    pub fn LoginPage() -> impl IntoView {
        let app = expect_context::<AppHandle>();
        let auth = use_auth();
        let navigate = use_navigate();

        let username = RwSignal::new(String::new());
        let password = RwSignal::new(String::new());
        let hint = RwSignal::new(None::<&'static str>);

        let on_submit = move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if auth.get_untracked().loading {
                return;
            }
            let credentials = match validate_login_input(&username.get_untracked(), &password.get_untracked()) {
                Ok(credentials) => credentials,
                Err(message) => {
                    hint.set(Some(message));
                    return;
                }
            };
            hint.set(None);
            auth.update(|s| s.loading = true);

            let ctx = app.get_value();
            let navigate = navigate.clone();
            spawn_local(async move {
                let ok = ctx.session.login(&credentials).await;
                sync_auth(&ctx, auth);
                if ok {
                    password.set(String::new());
                    navigate(LANDING_PATH, replace());
                }
            });
        };

        let message = move || hint.get().map(str::to_owned).or_else(|| auth.get().error);

        view! {
            <div class="login-page">
                <div class="login-card">
                    <h1>"Weekly Reports"</h1>
                    <p class="login-card__subtitle">"Sign in with your employee account"</p>
                    <form class="login-form" on:submit=on_submit>
                        <input
                            class="login-input"
                            type="text"
                            autocomplete="username"
                            placeholder="Username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            autocomplete="current-password"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || auth.get().loading>
                            {move || if auth.get().loading { "Signing in..." } else { "Sign In" }}
                        </button>
                    </form>
                    <Show when=move || message().is_some()>
                        <p class="login-message">{move || message().unwrap_or_default()}</p>
                    </Show>
                </div>
            </div>
        }
    }
}
