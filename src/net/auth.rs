//! Authentication endpoints: `POST /login`, `POST /logout`, `GET /user`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::error::ApiError;
use super::http::{ApiClient, ApiRequest, Transport};
use super::types::{Ack, ApiResponse, Credentials, LoginData, User};

/// Backend operations the session store depends on.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Exchange credentials for a token and user.
    ///
    /// # Errors
    ///
    /// Transport, status and decode failures. A `success: false` envelope is
    /// returned as `Ok`.
    async fn login(&self, credentials: &Credentials) -> Result<ApiResponse<LoginData>, ApiError>;

    /// Invalidate the current token server-side.
    ///
    /// # Errors
    ///
    /// Transport, status and decode failures.
    async fn logout(&self) -> Result<Ack, ApiError>;

    /// Load the user the current token belongs to.
    ///
    /// # Errors
    ///
    /// Transport, status and decode failures.
    async fn current_user(&self) -> Result<ApiResponse<User>, ApiError>;
}

/// [`AuthApi`] over the shared REST client.
pub struct AuthService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for AuthService<T> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone() }
    }
}

impl<T: Transport> AuthService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> AuthApi for AuthService<T> {
    async fn login(&self, credentials: &Credentials) -> Result<ApiResponse<LoginData>, ApiError> {
        let request = ApiRequest::post("/login").json(credentials)?;
        self.client.send_json(request).await
    }

    async fn logout(&self) -> Result<Ack, ApiError> {
        self.client.send_ack(ApiRequest::post("/logout")).await
    }

    async fn current_user(&self) -> Result<ApiResponse<User>, ApiError> {
        self.client.send_json(ApiRequest::get("/user")).await
    }
}
