//! Browser `fetch` transport via `gloo-net`.
//!
//! Only compiled for the `csr` build; native builds and tests use their own
//! [`Transport`] implementations.

use gloo_net::http::{Method as FetchMethod, RequestBuilder};

use super::http::{ApiRequest, Method, RawResponse, Transport};

#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

fn fetch_method(method: Method) -> FetchMethod {
    match method {
        Method::Get => FetchMethod::GET,
        Method::Post => FetchMethod::POST,
        Method::Put => FetchMethod::PUT,
        Method::Patch => FetchMethod::PATCH,
        Method::Delete => FetchMethod::DELETE,
    }
}

impl Transport for FetchTransport {
    async fn send(&self, url: &str, request: &ApiRequest) -> Result<RawResponse, String> {
        let mut builder = RequestBuilder::new(url).method(fetch_method(request.method));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let response = match &request.body {
            Some(body) => builder.body(body.clone()).map_err(|e| e.to_string())?.send().await,
            None => builder.send().await,
        }
        .map_err(|e| e.to_string())?;

        let status = response.status();
        let body = response.binary().await.map_err(|e| e.to_string())?;
        Ok(RawResponse { status, body })
    }
}
