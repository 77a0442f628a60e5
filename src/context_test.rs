use std::cell::RefCell;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::fake::FakeTransport;
use crate::net::types::{Credentials, EntryFilters};
use crate::state::fake_auth::user_json;
use crate::state::session::{SessionPhase, TOKEN_KEY, USER_KEY};
use crate::util::storage::MemoryStorage;

type Visits = Rc<RefCell<Vec<String>>>;

fn context(storage: MemoryStorage) -> (AppContext<FakeTransport>, FakeTransport, Rc<MemoryStorage>, Visits) {
    let transport = FakeTransport::default();
    let storage = Rc::new(storage);
    let config = ClientConfig::from_values(Some("http://api.test/api"), None, None);
    let ctx = AppContext::new(config, transport.clone(), storage.clone());

    let visits: Visits = Rc::default();
    let seen = Rc::clone(&visits);
    ctx.install_unauth_redirect(move |path| seen.borrow_mut().push(path.to_owned()));
    (ctx, transport, storage, visits)
}

fn signed_in() -> MemoryStorage {
    MemoryStorage::new().with(TOKEN_KEY, "tok").with(USER_KEY, &user_json(1))
}

#[test]
fn wrappers_send_persisted_token() {
    let (ctx, transport, _, _) = context(signed_in());
    transport.reply(200, json!({"success": true, "data": []}));

    block_on(ctx.enums.status_options()).unwrap();
    assert_eq!(transport.last().1.header_value("Authorization"), Some("Bearer tok"));
}

#[test]
fn token_from_login_is_used_by_later_calls() {
    let (ctx, transport, _, _) = context(MemoryStorage::new());
    transport.reply(
        200,
        json!({"success": true, "data": {"token": "fresh", "token_type": "Bearer", "expires_in": 60,
               "user": serde_json::from_str::<serde_json::Value>(&user_json(2)).unwrap()}}),
    );
    transport.reply(200, json!({"success": true, "data": []}));

    assert!(block_on(ctx.session.login(&Credentials::new("u", "pw"))));
    assert_eq!(transport.last().1.header_value("Authorization"), None);

    block_on(ctx.enums.status_options()).unwrap();
    assert_eq!(transport.last().1.header_value("Authorization"), Some("Bearer fresh"));
}

#[test]
fn unauthorized_clears_session_and_redirects_once() {
    let (ctx, transport, storage, visits) = context(signed_in());
    transport.reply(401, json!({"message": "Unauthenticated."}));

    let err = block_on(ctx.entries.list(&EntryFilters::default())).unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(*visits.borrow(), vec![LOGIN_PATH.to_owned()]);
    assert_eq!(ctx.session.phase(), SessionPhase::Anonymous);
    assert!(storage.is_empty());
}

#[test]
fn each_failing_call_redirects_once() {
    let (ctx, transport, _, visits) = context(signed_in());
    transport.reply(401, json!({}));
    transport.reply(401, json!({}));

    let _ = block_on(ctx.weekly_reports.list());
    let _ = block_on(ctx.pdf.download(1));
    assert_eq!(visits.borrow().len(), 2);
}

#[test]
fn unauthorized_during_fetch_user_does_not_loop() {
    let (ctx, transport, storage, visits) = context(MemoryStorage::new().with(TOKEN_KEY, "stale"));
    transport.reply(401, json!({"message": "Unauthenticated."}));

    block_on(ctx.session.initialize_auth());

    // One GET /user; logout skips the backend because the hook already cleared the token.
    assert_eq!(transport.count(), 1);
    assert_eq!(visits.borrow().len(), 1);
    assert_eq!(ctx.session.phase(), SessionPhase::Anonymous);
    assert!(storage.is_empty());
}

#[test]
fn non_auth_failures_do_not_redirect() {
    let (ctx, transport, _, visits) = context(signed_in());
    transport.reply(500, json!({"message": "boom"}));
    transport.fail("offline");

    let _ = block_on(ctx.weekly_reports.get(1));
    let _ = block_on(ctx.weekly_reports.get(1));
    assert!(visits.borrow().is_empty());
    assert!(ctx.session.is_authenticated());
}

#[test]
fn logout_with_unreachable_backend_clears_without_redirect() {
    let (ctx, transport, storage, visits) = context(signed_in());
    transport.fail("unreachable");

    block_on(ctx.session.logout());
    assert_eq!(transport.last().0, "http://api.test/api/logout");
    assert!(storage.is_empty());
    assert!(visits.borrow().is_empty());
}

#[test]
fn hook_survives_context_clone() {
    let (ctx, transport, _, visits) = context(signed_in());
    let copy = ctx.clone();
    transport.reply(401, json!({}));

    let _ = block_on(copy.enums.status_options());
    assert_eq!(visits.borrow().len(), 1);
    assert!(!ctx.session.is_authenticated());
}
