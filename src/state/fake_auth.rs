//! Scripted [`AuthApi`] for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::net::auth::AuthApi;
use crate::net::error::ApiError;
use crate::net::types::{Ack, ApiResponse, Credentials, LoginData, User};

pub fn user(id: u64) -> User {
    User {
        id,
        employee_id: format!("EMP-{id:03}"),
        name: "Ada Lovelace".to_owned(),
        email: "ada@example.test".to_owned(),
        department: "Operations".to_owned(),
        position: "Analyst".to_owned(),
        manager_id: Some(1),
    }
}

pub fn user_json(id: u64) -> String {
    serde_json::to_string(&user(id)).unwrap()
}

pub fn login_ok(token: &str, id: u64) -> Result<ApiResponse<LoginData>, ApiError> {
    Ok(ApiResponse {
        success: true,
        data: Some(LoginData {
            token: token.to_owned(),
            token_type: "Bearer".to_owned(),
            expires_in: 3600,
            user: user(id),
        }),
        message: None,
        errors: None,
        error: None,
    })
}

pub fn rejected<T>(message: Option<&str>) -> Result<ApiResponse<T>, ApiError> {
    Ok(ApiResponse { success: false, data: None, message: message.map(str::to_owned), errors: None, error: None })
}

pub fn user_ok(id: u64) -> Result<ApiResponse<User>, ApiError> {
    Ok(ApiResponse { success: true, data: Some(user(id)), message: None, errors: None, error: None })
}

/// Replays queued results per operation and counts calls.
#[derive(Clone, Default)]
pub struct FakeAuth {
    pub logins: Rc<RefCell<VecDeque<Result<ApiResponse<LoginData>, ApiError>>>>,
    pub logouts: Rc<RefCell<VecDeque<Result<Ack, ApiError>>>>,
    pub users: Rc<RefCell<VecDeque<Result<ApiResponse<User>, ApiError>>>>,
    pub login_calls: Rc<Cell<usize>>,
    pub logout_calls: Rc<Cell<usize>>,
    pub user_calls: Rc<Cell<usize>>,
}

impl FakeAuth {
    pub fn on_login(&self, result: Result<ApiResponse<LoginData>, ApiError>) -> &Self {
        self.logins.borrow_mut().push_back(result);
        self
    }

    pub fn on_logout(&self, result: Result<Ack, ApiError>) -> &Self {
        self.logouts.borrow_mut().push_back(result);
        self
    }

    pub fn on_user(&self, result: Result<ApiResponse<User>, ApiError>) -> &Self {
        self.users.borrow_mut().push_back(result);
        self
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

fn unscripted() -> ApiError {
    ApiError::Network("unscripted call".to_owned())
}

impl AuthApi for FakeAuth {
    async fn login(&self, _credentials: &Credentials) -> Result<ApiResponse<LoginData>, ApiError> {
        bump(&self.login_calls);
        self.logins.borrow_mut().pop_front().unwrap_or_else(|| Err(unscripted()))
    }

    async fn logout(&self) -> Result<Ack, ApiError> {
        bump(&self.logout_calls);
        self.logouts
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(Ack { success: true, message: None }))
    }

    async fn current_user(&self) -> Result<ApiResponse<User>, ApiError> {
        bump(&self.user_calls);
        self.users.borrow_mut().pop_front().unwrap_or_else(|| Err(unscripted()))
    }
}
