//! Shared HTTP plumbing for every REST wrapper.
//!
//! SYSTEM CONTEXT
//! ==============
//! Domain wrappers (`auth`, `entries`, `weekly_reports`, `enums`, `pdf`) only
//! describe requests. `ApiClient` applies the cross-cutting behavior once:
//! bearer attachment on the way out and 401 interception on the way back.
//!
//! DESIGN
//! ======
//! The client never imports the session store or the router. It reads the
//! token through a `TokenSource` closure and reports 401s through an
//! `UnauthorizedHook`; the app context owns both ends and reacts, which keeps
//! the store -> client -> router cycle out of the module graph.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is an [`ApiError`]. A 401 fires the hook exactly once per
//! failing call and is still returned to the caller.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::Ack;

pub const JSON: &str = "application/json";
pub const STATUS_UNAUTHORIZED: u16 = 401;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A backend call, described independently of the transport that sends it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, including any query string.
    pub path: String,
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body.
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), headers: Vec::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Set a header, replacing any existing value with the same name.
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
        self
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let raw = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.body = Some(raw);
        Ok(self.header("Content-Type", JSON))
    }

    /// Append `params` as a query string. Absent optional fields are dropped,
    /// and nothing is appended when every field is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `params` is not a flat struct or map.
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self, ApiError> {
        let qs = serde_urlencoded::to_string(params).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !qs.is_empty() {
            let sep = if self.path.contains('?') { '&' } else { '?' };
            self.path = format!("{}{sep}{qs}", self.path);
        }
        Ok(self)
    }
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `message` (or `error`) string from a JSON error body, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
            .map(str::to_owned)
    }
}

/// Something that can perform one HTTP exchange.
///
/// Futures are not `Send`: the client runs on the browser event loop.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Send `request` to the absolute `url`.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure when no response was received.
    async fn send(&self, url: &str, request: &ApiRequest) -> Result<RawResponse, String>;
}

/// Reads the current bearer token, if any.
pub type TokenSource = Rc<dyn Fn() -> Option<String>>;

/// Late-bound reaction to a 401 response.
///
/// Cloning shares the slot, so a handler installed after the client is built
/// is seen by every clone.
#[derive(Clone, Default)]
pub struct UnauthorizedHook {
    handler: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl UnauthorizedHook {
    /// Install `handler`, replacing any previous one.
    pub fn set(&self, handler: impl Fn() + 'static) {
        *self.handler.borrow_mut() = Some(Rc::new(handler));
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.handler.borrow().is_some()
    }

    /// Run the installed handler. The slot is released before the call so the
    /// handler may itself touch the hook.
    pub fn fire(&self) {
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

impl std::fmt::Debug for UnauthorizedHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnauthorizedHook").field("set", &self.is_set()).finish()
    }
}

/// Transport plus the behavior every backend call shares.
pub struct ApiClient<T> {
    base_url: String,
    transport: Rc<T>,
    token: TokenSource,
    unauthorized: UnauthorizedHook,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            transport: Rc::clone(&self.transport),
            token: Rc::clone(&self.token),
            unauthorized: self.unauthorized.clone(),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T, token: impl Fn() -> Option<String> + 'static) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            transport: Rc::new(transport),
            token: Rc::new(token),
            unauthorized: UnauthorizedHook::default(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Hook fired on every 401 response.
    #[must_use]
    pub fn unauthorized_hook(&self) -> &UnauthorizedHook {
        &self.unauthorized
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Apply default headers and the bearer token.
    fn prepare(&self, mut request: ApiRequest) -> ApiRequest {
        if request.header_value("Accept").is_none() {
            request = request.header("Accept", JSON);
        }
        if let Some(token) = (self.token)().filter(|t| !t.is_empty()) {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    /// Send `request` and return the raw response of any non-401 status.
    ///
    /// # Errors
    ///
    /// [`ApiError::Network`] when no response arrives, [`ApiError::Unauthorized`]
    /// on 401 (after firing the hook).
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let request = self.prepare(request);
        let url = self.url(&request.path);
        log::debug!("{} {url}", request.method.as_str());

        let response = self.transport.send(&url, &request).await.map_err(|e| {
            log::warn!("{} {url} failed: {e}", request.method.as_str());
            ApiError::Network(e)
        })?;

        if response.status == STATUS_UNAUTHORIZED {
            log::warn!("{} {url} unauthorized; clearing session", request.method.as_str());
            self.unauthorized.fire();
            return Err(ApiError::Unauthorized { message: response.error_message() });
        }
        Ok(response)
    }

    /// Send `request` and decode a 2xx JSON body as `R`.
    ///
    /// # Errors
    ///
    /// Anything [`ApiClient::send`] returns, plus [`ApiError::Status`] for other
    /// non-2xx statuses and [`ApiError::Decode`] for malformed bodies.
    pub async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::Status { status: response.status, message: response.error_message() });
        }
        response.json()
    }

    /// Send a request whose 2xx answer carries no payload. An empty body
    /// (e.g. `204 No Content`) reads as a successful [`Ack`].
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send_json`].
    pub async fn send_ack(&self, request: ApiRequest) -> Result<Ack, ApiError> {
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::Status { status: response.status, message: response.error_message() });
        }
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Ack::default());
        }
        response.json()
    }
}
