//! Application context: the single owner of storage, API client and session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once at startup and never torn down. The session store needs the
//! auth wrapper, the wrappers need the token, and a 401 anywhere must clear
//! the session and redirect. The context wires those ends together:
//! the client reads the token from storage and reports 401s through its hook,
//! and the hook handler (installed here) clears the session and navigates.
//! The handler holds a weak session reference so the client -> hook -> store
//! -> client chain does not leak.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::rc::Rc;

use crate::config::ClientConfig;
use crate::net::auth::AuthService;
use crate::net::entries::EntriesService;
use crate::net::enums::EnumsService;
use crate::net::http::{ApiClient, Transport};
use crate::net::pdf::PdfService;
use crate::net::weekly_reports::WeeklyReportsService;
use crate::routes::LOGIN_PATH;
use crate::state::session::{SessionStore, persisted_token};
use crate::util::storage::KeyValueStorage;

pub struct AppContext<T> {
    pub config: ClientConfig,
    pub storage: Rc<dyn KeyValueStorage>,
    pub api: ApiClient<T>,
    pub session: Rc<SessionStore<AuthService<T>>>,
    pub entries: EntriesService<T>,
    pub weekly_reports: WeeklyReportsService<T>,
    pub enums: EnumsService<T>,
    pub pdf: PdfService<T>,
}

impl<T> Clone for AppContext<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            storage: Rc::clone(&self.storage),
            api: self.api.clone(),
            session: Rc::clone(&self.session),
            entries: self.entries.clone(),
            weekly_reports: self.weekly_reports.clone(),
            enums: self.enums.clone(),
            pdf: self.pdf.clone(),
        }
    }
}

impl<T: Transport + 'static> AppContext<T> {
    pub fn new(config: ClientConfig, transport: T, storage: Rc<dyn KeyValueStorage>) -> Self {
        let token_storage = Rc::clone(&storage);
        let api = ApiClient::new(config.api_base_url.clone(), transport, move || {
            persisted_token(token_storage.as_ref())
        });
        let session = Rc::new(SessionStore::new(AuthService::new(api.clone()), Rc::clone(&storage)));
        log::info!("client ready against {}", api.base_url());

        Self {
            entries: EntriesService::new(api.clone()),
            weekly_reports: WeeklyReportsService::new(api.clone()),
            enums: EnumsService::new(api.clone()),
            pdf: PdfService::new(api.clone()),
            config,
            storage,
            api,
            session,
        }
    }

    /// React to every 401 by clearing the session and navigating to login.
    /// Replaces any previously installed reaction.
    pub fn install_unauth_redirect<F>(&self, navigate: F)
    where
        F: Fn(&str) + 'static,
    {
        let session = Rc::downgrade(&self.session);
        self.api.unauthorized_hook().set(move || {
            if let Some(session) = session.upgrade() {
                session.clear();
            }
            navigate(LOGIN_PATH);
        });
    }
}
