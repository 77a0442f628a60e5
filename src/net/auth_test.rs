use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::fake::client;
use crate::net::http::Method;

fn user_json() -> serde_json::Value {
    json!({
        "id": 7,
        "employee_id": "EMP-007",
        "name": "Ada",
        "email": "ada@example.test",
        "department": "Ops",
        "position": "Analyst"
    })
}

#[test]
fn login_posts_credentials_and_decodes_token() {
    let (client, transport) = client(None);
    transport.reply(
        200,
        json!({
            "success": true,
            "data": {"token": "t-1", "token_type": "Bearer", "expires_in": 3600, "user": user_json()}
        }),
    );
    let auth = AuthService::new(client);

    let resp = block_on(auth.login(&Credentials::new("ada", "pw"))).unwrap();
    let data = resp.into_data().unwrap();
    assert_eq!(data.token, "t-1");
    assert_eq!(data.user.employee_id, "EMP-007");

    let (url, req) = transport.last();
    assert_eq!(url, "http://api.test/api/login");
    assert_eq!(req.method, Method::Post);
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"username": "ada", "password": "pw"}));
}

#[test]
fn login_rejection_is_returned_as_envelope() {
    let (client, transport) = client(None);
    transport.reply(200, json!({"success": false, "message": "Invalid credentials"}));
    let auth = AuthService::new(client);

    let resp = block_on(auth.login(&Credentials::new("u", "bad"))).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.message.as_deref(), Some("Invalid credentials"));
}

#[test]
fn logout_posts_with_bearer() {
    let (client, transport) = client(Some("t-1"));
    transport.reply(200, json!({"success": true, "message": "Logged out"}));
    let auth = AuthService::new(client);

    let ack = block_on(auth.logout()).unwrap();
    assert!(ack.success);
    let (url, req) = transport.last();
    assert_eq!(url, "http://api.test/api/logout");
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.header_value("Authorization"), Some("Bearer t-1"));
}

#[test]
fn logout_with_no_content_succeeds() {
    let (client, transport) = client(Some("t-1"));
    transport.reply_raw(204, Vec::new());

    assert!(block_on(AuthService::new(client).logout()).unwrap().success);
}

#[test]
fn current_user_gets_user_endpoint() {
    let (client, transport) = client(Some("t-1"));
    transport.reply(200, json!({"success": true, "data": user_json()}));
    let auth = AuthService::new(client);

    let user = block_on(auth.current_user()).unwrap().into_data().unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.manager_id, None);
    assert_eq!(transport.last().0, "http://api.test/api/user");
    assert_eq!(transport.last().1.method, Method::Get);
}
