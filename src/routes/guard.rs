//! Navigation guard run before every route change.
//!
//! ORDERING
//! ========
//! Rehydration must finish before access rules are checked: a reload with a
//! valid persisted token would otherwise read as signed-out and bounce to
//! login.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::{LANDING_PATH, LOGIN_PATH, RouteMeta};
use crate::net::auth::AuthApi;
use crate::state::session::{SessionPhase, SessionStore};

/// Outcome of the guard for one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Continue to the requested route.
    Allow,
    /// Abort and go to this app path instead.
    Redirect(&'static str),
}

/// Decide whether a navigation to a route with `meta` may proceed.
pub async fn before_each<A: AuthApi>(session: &SessionStore<A>, meta: RouteMeta) -> Navigation {
    if session.phase() == SessionPhase::TokenOnly {
        session.initialize_auth().await;
    }

    if meta.requires_auth && !session.is_authenticated() {
        session.clear_error();
        log::debug!("guard: not signed in, redirecting to {LOGIN_PATH}");
        return Navigation::Redirect(LOGIN_PATH);
    }

    if meta.requires_guest && session.is_authenticated() {
        log::debug!("guard: already signed in, redirecting to {LANDING_PATH}");
        return Navigation::Redirect(LANDING_PATH);
    }

    Navigation::Allow
}
