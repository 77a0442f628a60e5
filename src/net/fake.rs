//! Scripted transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::http::{ApiClient, ApiRequest, RawResponse, Transport};

/// Transport that replays queued responses and records every request.
#[derive(Clone, Default)]
pub struct FakeTransport {
    responses: Rc<RefCell<VecDeque<Result<RawResponse, String>>>>,
    requests: Rc<RefCell<Vec<(String, ApiRequest)>>>,
}

impl FakeTransport {
    pub fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
        self.reply_raw(status, body.to_string().into_bytes())
    }

    pub fn reply_raw(&self, status: u16, body: Vec<u8>) -> &Self {
        self.responses.borrow_mut().push_back(Ok(RawResponse { status, body }));
        self
    }

    pub fn fail(&self, error: &str) -> &Self {
        self.responses.borrow_mut().push_back(Err(error.to_owned()));
        self
    }

    pub fn requests(&self) -> Vec<(String, ApiRequest)> {
        self.requests.borrow().clone()
    }

    pub fn last(&self) -> (String, ApiRequest) {
        self.requests.borrow().last().cloned().expect("no request sent")
    }

    pub fn count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, url: &str, request: &ApiRequest) -> Result<RawResponse, String> {
        self.requests.borrow_mut().push((url.to_owned(), request.clone()));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response".to_owned()))
    }
}

/// Client over a fresh fake transport with a fixed token.
pub fn client(token: Option<&str>) -> (ApiClient<FakeTransport>, FakeTransport) {
    let transport = FakeTransport::default();
    let token = token.map(str::to_owned);
    let client = ApiClient::new("http://api.test/api", transport.clone(), move || token.clone());
    (client, transport)
}
