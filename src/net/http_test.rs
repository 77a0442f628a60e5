use std::cell::Cell;
use std::rc::Rc;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::fake::{FakeTransport, client};

// =============================================================
// ApiRequest
// =============================================================

#[derive(Serialize)]
struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    per_page: Option<u32>,
}

#[test]
fn query_drops_absent_values() {
    let req = ApiRequest::get("/entries")
        .query(&Filters { status: None, per_page: Some(25) })
        .unwrap();
    assert_eq!(req.path, "/entries?per_page=25");
}

#[test]
fn query_with_no_values_leaves_path_untouched() {
    let req = ApiRequest::get("/entries")
        .query(&Filters { status: None, per_page: None })
        .unwrap();
    assert_eq!(req.path, "/entries");
}

#[test]
fn query_percent_encodes_values() {
    let req = ApiRequest::get("/entries")
        .query(&Filters { status: Some("in progress"), per_page: None })
        .unwrap();
    assert_eq!(req.path, "/entries?status=in+progress");
}

#[test]
fn json_body_sets_content_type() {
    let req = ApiRequest::post("/login").json(&json!({"username": "u"})).unwrap();
    assert_eq!(req.body.as_deref(), Some(r#"{"username":"u"}"#));
    assert_eq!(req.header_value("content-type"), Some(JSON));
}

#[test]
fn header_replaces_existing_value_case_insensitively() {
    let req = ApiRequest::get("/x").header("Accept", "a").header("accept", "b");
    assert_eq!(req.headers.len(), 1);
    assert_eq!(req.header_value("ACCEPT"), Some("b"));
}

// =============================================================
// RawResponse
// =============================================================

#[test]
fn error_message_prefers_message_then_error() {
    let resp = RawResponse { status: 422, body: br#"{"message":"m1","error":"m2"}"#.to_vec() };
    assert_eq!(resp.error_message().as_deref(), Some("m1"));

    let resp = RawResponse { status: 500, body: br#"{"error":"m2"}"#.to_vec() };
    assert_eq!(resp.error_message().as_deref(), Some("m2"));

    let resp = RawResponse { status: 500, body: b"<html>".to_vec() };
    assert_eq!(resp.error_message(), None);
}

#[test]
fn is_success_covers_2xx_only() {
    assert!(RawResponse { status: 204, body: Vec::new() }.is_success());
    assert!(!RawResponse { status: 302, body: Vec::new() }.is_success());
    assert!(!RawResponse { status: 199, body: Vec::new() }.is_success());
}

// =============================================================
// ApiClient outbound
// =============================================================

#[test]
fn url_joins_base_and_path() {
    let (client, _) = client(None);
    assert_eq!(client.url("/entries"), "http://api.test/api/entries");
    assert_eq!(client.url("entries"), "http://api.test/api/entries");
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let client = ApiClient::new("http://api.test/api/", FakeTransport::default(), || None);
    assert_eq!(client.base_url(), "http://api.test/api");
}

#[test]
fn bearer_token_is_attached_when_present() {
    let (client, transport) = client(Some("tok-1"));
    transport.reply(200, json!({}));
    block_on(client.send(ApiRequest::get("/user"))).unwrap();

    let (url, req) = transport.last();
    assert_eq!(url, "http://api.test/api/user");
    assert_eq!(req.header_value("Authorization"), Some("Bearer tok-1"));
    assert_eq!(req.header_value("Accept"), Some(JSON));
}

#[test]
fn no_authorization_header_without_token() {
    let (client, transport) = client(None);
    transport.reply(200, json!({}));
    block_on(client.send(ApiRequest::get("/user"))).unwrap();
    assert_eq!(transport.last().1.header_value("Authorization"), None);
}

#[test]
fn empty_token_is_not_sent() {
    let (client, transport) = client(Some(""));
    transport.reply(200, json!({}));
    block_on(client.send(ApiRequest::get("/user"))).unwrap();
    assert_eq!(transport.last().1.header_value("Authorization"), None);
}

#[test]
fn explicit_accept_header_is_kept() {
    let (client, transport) = client(None);
    transport.reply_raw(200, b"%PDF".to_vec());
    block_on(client.send(ApiRequest::get("/pdf").header("Accept", "application/pdf"))).unwrap();
    assert_eq!(transport.last().1.header_value("Accept"), Some("application/pdf"));
}

// =============================================================
// ApiClient inbound
// =============================================================

#[test]
fn unauthorized_fires_hook_once_and_propagates() {
    let (client, transport) = client(Some("stale"));
    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    client.unauthorized_hook().set(move || counter.set(counter.get() + 1));

    transport.reply(401, json!({"message": "Unauthenticated."}));
    let err = block_on(client.send_json::<serde_json::Value>(ApiRequest::get("/entries"))).unwrap_err();

    assert_eq!(err, ApiError::Unauthorized { message: Some("Unauthenticated.".to_owned()) });
    assert_eq!(fired.get(), 1);
}

#[test]
fn hook_installed_after_clone_is_shared() {
    let (client, transport) = client(None);
    let copy = client.clone();
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    client.unauthorized_hook().set(move || flag.set(true));

    transport.reply(401, json!({}));
    let _ = block_on(copy.send(ApiRequest::get("/user")));
    assert!(fired.get());
}

#[test]
fn unauthorized_without_hook_still_errors() {
    let (client, transport) = client(None);
    transport.reply(401, json!({}));
    let err = block_on(client.send(ApiRequest::get("/user"))).unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn other_statuses_do_not_fire_hook() {
    let (client, transport) = client(None);
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    client.unauthorized_hook().set(move || flag.set(true));

    transport.reply(403, json!({"message": "Forbidden"}));
    let err = block_on(client.send_json::<serde_json::Value>(ApiRequest::get("/x"))).unwrap_err();
    assert_eq!(err, ApiError::Status { status: 403, message: Some("Forbidden".to_owned()) });
    assert!(!fired.get());
}

#[test]
fn transport_failure_maps_to_network_error() {
    let (client, transport) = client(None);
    transport.fail("connection refused");
    let err = block_on(client.send(ApiRequest::get("/user"))).unwrap_err();
    assert_eq!(err, ApiError::Network("connection refused".to_owned()));
    assert_eq!(err.server_message(), None);
}

#[test]
fn malformed_body_maps_to_decode_error() {
    let (client, transport) = client(None);
    transport.reply_raw(200, b"not json".to_vec());
    let err = block_on(client.send_json::<serde_json::Value>(ApiRequest::get("/x"))).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// =============================================================
// send_ack
// =============================================================

#[test]
fn empty_success_body_is_an_ack() {
    let (client, transport) = client(None);
    transport.reply_raw(204, Vec::new());
    transport.reply_raw(200, b"  \n".to_vec());

    assert_eq!(block_on(client.send_ack(ApiRequest::delete("/x"))).unwrap(), Ack::default());
    assert!(block_on(client.send_ack(ApiRequest::delete("/x"))).unwrap().success);
}

#[test]
fn ack_body_without_success_flag_reads_as_success() {
    let (client, transport) = client(None);
    transport.reply(200, json!({"message": "Deleted"}));

    let ack = block_on(client.send_ack(ApiRequest::delete("/x"))).unwrap();
    assert!(ack.success);
    assert_eq!(ack.message.as_deref(), Some("Deleted"));
}

#[test]
fn ack_keeps_explicit_failure_and_error_statuses() {
    let (client, transport) = client(None);
    transport.reply(200, json!({"success": false, "message": "Locked"}));
    transport.reply_raw(404, Vec::new());

    assert!(!block_on(client.send_ack(ApiRequest::delete("/x"))).unwrap().success);
    let err = block_on(client.send_ack(ApiRequest::delete("/x"))).unwrap_err();
    assert_eq!(err, ApiError::Status { status: 404, message: None });
}
