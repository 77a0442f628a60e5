//! Header bar for authenticated pages: navigation, identity and logout.

#[cfg(test)]
#[path = "app_header_test.rs"]
mod app_header_test;

use crate::net::types::User;

/// Label for the signed-in user, e.g. `Ada Lovelace (EMP-001)`.
pub fn display_name(user: Option<&User>) -> String {
    match user {
        Some(user) if user.employee_id.is_empty() => user.name.clone(),
        Some(user) => format!("{} ({})", user.name, user.employee_id),
        None => "Signed out".to_owned(),
    }
}

#[cfg(feature = "csr")]
pub use view::AppHeader;

#[cfg(feature = "csr")]
mod view {
    use leptos::prelude::*;
    use leptos::task::spawn_local;
    use leptos_router::components::A;
    use leptos_router::hooks::use_navigate;

    use super::display_name;
    use crate::app::{AppHandle, replace, sync_auth, use_auth};
    use crate::routes::{DAILY_ENTRIES_PATH, LOGIN_PATH, WEEKLY_REPORTS_PATH};

    #[component]
    pub fn AppHeader() -> impl IntoView {
        let app = expect_context::<AppHandle>();
        let auth = use_auth();
        let navigate = use_navigate();

        let on_logout = move |_| {
            let ctx = app.get_value();
            let navigate = navigate.clone();
            spawn_local(async move {
                ctx.session.logout().await;
                sync_auth(&ctx, auth);
                navigate(LOGIN_PATH, replace());
            });
        };

        view! {
            <header class="app-header toolbar">
                <nav class="app-header__nav">
                    <A href=WEEKLY_REPORTS_PATH>"Weekly Reports"</A>
                    <A href=DAILY_ENTRIES_PATH>"Daily Entries"</A>
                </nav>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">{move || display_name(auth.get().user.as_ref())}</span>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>
        }
    }
}
