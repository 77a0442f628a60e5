//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Builds the one [`AppContext`] for the page, exposes it to components
//! through a local `StoredValue`, and mirrors the session into an
//! `RwSignal<AuthState>` so views re-render when it changes. Every routed
//! page is wrapped in [`Guarded`], which runs the navigation guard before
//! its children render.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::hooks::use_navigate;
use leptos_router::{
    NavigateOptions, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::net::fetch::FetchTransport;
use crate::pages::daily_entries::DailyEntriesPage;
use crate::pages::login::LoginPage;
use crate::pages::weekly_reports::WeeklyReportsPage;
use crate::routes::guard::{Navigation, before_each};
use crate::routes::{ROOT_REDIRECT, RouteMeta};
use crate::state::session::AuthState;
use crate::util::storage::BrowserStorage;

/// Context handle for the app-wide [`AppContext`]. The context holds `Rc`s,
/// so it lives in local (non-`Send`) arena storage.
pub type AppHandle = StoredValue<AppContext<FetchTransport>, LocalStorage>;

/// The app context for the current page.
pub fn use_app() -> AppContext<FetchTransport> {
    expect_context::<AppHandle>().get_value()
}

/// Reactive mirror of the session store.
pub fn use_auth() -> RwSignal<AuthState> {
    expect_context::<RwSignal<AuthState>>()
}

/// Copy the session store's current state into the reactive mirror.
pub fn sync_auth(ctx: &AppContext<FetchTransport>, auth: RwSignal<AuthState>) {
    auth.set(ctx.session.snapshot());
}

/// Navigation that replaces the current history entry.
pub fn replace() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let router_base = config.router_base.clone();
    let ctx = AppContext::new(config, FetchTransport, Rc::new(BrowserStorage));
    let auth = RwSignal::new(ctx.session.snapshot());

    provide_context::<AppHandle>(StoredValue::new_local(ctx));
    provide_context(auth);

    view! {
        <Title text="Weekly Reports"/>

        <Router base=router_base>
            <UnauthRedirect/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=ROOT_REDIRECT/> }/>
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <Guarded meta=RouteMeta::GUEST><LoginPage/></Guarded> }
                />
                <Route
                    path=StaticSegment("weekly-reports")
                    view=|| view! { <Guarded meta=RouteMeta::AUTH><WeeklyReportsPage/></Guarded> }
                />
                <Route
                    path=StaticSegment("daily-entries")
                    view=|| view! { <Guarded meta=RouteMeta::AUTH><DailyEntriesPage/></Guarded> }
                />
            </Routes>
        </Router>
    }
}

/// Points the API client's 401 reaction at the router. Must sit inside
/// `<Router>` so `use_navigate` resolves against the router base.
#[component]
fn UnauthRedirect() -> impl IntoView {
    let app = expect_context::<AppHandle>();
    let auth = use_auth();
    let navigate = use_navigate();

    app.with_value(|ctx| {
        ctx.install_unauth_redirect(move |path| {
            auth.update(|state| {
                state.token = None;
                state.user = None;
            });
            log::info!("session expired, redirecting to {path}");
            navigate(path, replace());
        });
    });
}

/// Runs the navigation guard for `meta` and renders `children` only once the
/// guard allows the route.
#[component]
fn Guarded(meta: RouteMeta, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let allowed = RwSignal::new(false);
    let ctx = use_app();

    spawn_local(async move {
        let decision = before_each(&ctx.session, meta).await;
        sync_auth(&ctx, auth);
        match decision {
            Navigation::Allow => allowed.set(true),
            Navigation::Redirect(path) => navigate(path, replace()),
        }
    });

    view! {
        <Show when=move || allowed.get() fallback=|| view! { <p class="route-pending">"Loading..."</p> }>
            {children()}
        </Show>
    }
}
