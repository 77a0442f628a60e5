//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and user-aware pages to coordinate login redirects
//! and identity-dependent rendering. One store exists per app; it is built by
//! `AppContext` at startup and lives for the lifetime of the page.
//!
//! STATES
//! ======
//! `Anonymous` (no token), `TokenOnly` (token persisted but user not yet
//! loaded, only seen right after a reload) and `Authenticated`. An error
//! message is carried alongside any of them. Authentication is always derived
//! from token + user presence, never stored.
//!
//! CONCURRENCY
//! ===========
//! Methods take `&self` and keep state in a `RefCell`; no borrow is held
//! across an `.await`. A logout issued while `fetch_user` is in flight is not
//! serialized against it: whichever finishes last decides the final state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::net::auth::AuthApi;
use crate::net::types::{ApiResponse, Credentials, User};
use crate::util::storage::{KeyValueStorage, load_json, save_json};

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";

pub const LOGIN_FAILED: &str = "Login failed";
pub const NETWORK_ERROR: &str = "Network error occurred";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    TokenOnly,
    Authenticated,
}

/// Snapshot of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match (&self.token, &self.user) {
            (None, _) => SessionPhase::Anonymous,
            (Some(_), None) => SessionPhase::TokenOnly,
            (Some(_), Some(_)) => SessionPhase::Authenticated,
        }
    }
}

/// Read the persisted token and user. Blank tokens and unreadable users are
/// treated as absent.
pub fn rehydrate(storage: &dyn KeyValueStorage) -> AuthState {
    let token = persisted_token(storage);
    let user = load_json::<Option<User>>(storage, USER_KEY).flatten();
    AuthState { user, token, loading: false, error: None }
}

/// Current persisted token, read straight from storage.
pub fn persisted_token(storage: &dyn KeyValueStorage) -> Option<String> {
    storage.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
}

pub struct SessionStore<A> {
    api: A,
    storage: Rc<dyn KeyValueStorage>,
    state: RefCell<AuthState>,
}

impl<A: AuthApi> SessionStore<A> {
    /// Build the store, rehydrating from `storage`.
    pub fn new(api: A, storage: Rc<dyn KeyValueStorage>) -> Self {
        let state = rehydrate(storage.as_ref());
        log::debug!("session rehydrated: {:?}", state.phase());
        Self { api, storage, state: RefCell::new(state) }
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    fn set_loading(&self, loading: bool) {
        self.state.borrow_mut().loading = loading;
    }

    fn set_error(&self, error: impl Into<String>) {
        self.state.borrow_mut().error = Some(error.into());
    }

    pub fn clear_error(&self) {
        self.state.borrow_mut().error = None;
    }

    fn store_user(&self, user: User) {
        save_json(self.storage.as_ref(), USER_KEY, &user);
        self.state.borrow_mut().user = Some(user);
    }

    /// Drop token and user locally and from storage. No network call.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        let mut state = self.state.borrow_mut();
        state.token = None;
        state.user = None;
    }

    /// Sign in. Returns whether the session is now authenticated; on failure
    /// the reason is readable through [`SessionStore::error`].
    pub async fn login(&self, credentials: &Credentials) -> bool {
        self.set_loading(true);
        self.clear_error();

        let ok = match self.api.login(credentials).await {
            Ok(ApiResponse { success: true, data: Some(data), .. }) => {
                self.storage.set(TOKEN_KEY, &data.token);
                self.state.borrow_mut().token = Some(data.token);
                self.store_user(data.user);
                log::info!("signed in as {}", credentials.username);
                true
            }
            Ok(response) => {
                let message = response.message.or(response.error).unwrap_or_else(|| LOGIN_FAILED.to_owned());
                log::info!("login rejected: {message}");
                self.set_error(message);
                false
            }
            Err(e) => {
                log::warn!("login request failed: {e}");
                self.set_error(e.server_message().unwrap_or(NETWORK_ERROR));
                false
            }
        };

        self.set_loading(false);
        ok
    }

    /// Sign out. The backend call is best-effort; local state is always
    /// cleared.
    pub async fn logout(&self) {
        if self.token().is_some() {
            if let Err(e) = self.api.logout().await {
                log::warn!("logout request failed: {e}");
            }
        }
        self.clear();
        log::info!("signed out");
    }

    /// Load the user for the held token. Any failure signs out.
    pub async fn fetch_user(&self) -> bool {
        if self.token().is_none() {
            return false;
        }
        self.set_loading(true);

        let ok = match self.api.current_user().await.and_then(|r| r.into_data()) {
            Ok(user) => {
                self.store_user(user);
                true
            }
            Err(e) => {
                log::warn!("failed to load current user: {e}");
                self.logout().await;
                false
            }
        };

        self.set_loading(false);
        ok
    }

    /// Finish rehydration: load the user when only a token was persisted.
    pub async fn initialize_auth(&self) {
        if self.phase() == SessionPhase::TokenOnly {
            self.fetch_user().await;
        }
    }
}
