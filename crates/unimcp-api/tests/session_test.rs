#![allow(clippy::unwrap_used)]
// Integration tests for `Session` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unimcp_api::{Error, RawDevice, Scope, Session, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Session) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let session = Session::new(base_url, &TransportConfig::default()).unwrap();
    (server, session)
}

fn site_path(suffix: &str) -> String {
    format!("/proxy/network/api/s/default/{suffix}")
}

fn password(raw: &str) -> SecretString {
    raw.to_string().into()
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "username": "admin", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    session.login("admin", &password("hunter2")).await.unwrap();
}

#[tokio::test]
async fn test_login_failure_keeps_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let result = Session::authenticate(
        Url::parse(&server.uri()).unwrap(),
        "admin",
        &password("wrong"),
        &TransportConfig::default(),
    )
    .await;

    match result {
        Err(Error::Authentication { status, ref body }) => {
            assert_eq!(status, 403);
            assert_eq!(body, "Forbidden");
        }
        Err(other) => panic!("expected Authentication error, got: {other:?}"),
        Ok(_) => panic!("expected Authentication error, got a session"),
    }
}

#[tokio::test]
async fn test_session_cookie_is_reused() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "TOKEN=abc123; Path=/")
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(site_path("stat/health")))
        .and(header("cookie", "TOKEN=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    session.login("admin", &password("pw")).await.unwrap();
    let health: Vec<serde_json::Value> = session
        .get(Scope::Site("default"), "stat/health", &[])
        .await
        .unwrap();
    assert!(health.is_empty());
}

#[tokio::test]
async fn test_csrf_token_is_sent_on_post() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-CSRF-Token", "csrf-1")
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(site_path("cmd/devmgr")))
        .and(header("X-CSRF-Token", "csrf-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "rc": "ok" },
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    session.login("admin", &password("pw")).await.unwrap();
    let _: Vec<serde_json::Value> = session
        .post(
            Scope::Site("default"),
            "cmd/devmgr",
            &json!({ "cmd": "restart", "mac": "aa:bb:cc:dd:ee:ff" }),
        )
        .await
        .unwrap();
}

// ── Envelope tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_get_unwraps_data() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("stat/device")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "rc": "ok" },
            "data": [{
                "_id": "abc123",
                "mac": "aa:bb:cc:dd:ee:ff",
                "type": "usw",
                "name": "Switch-24",
                "model": "US24",
                "adopted": true,
                "state": 1
            }]
        })))
        .mount(&server)
        .await;

    let devices: Vec<RawDevice> = session
        .get(Scope::Site("default"), "stat/device", &[])
        .await
        .unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].mac, "aa:bb:cc:dd:ee:ff");
    assert_eq!(devices[0].name.as_deref(), Some("Switch-24"));
    assert_eq!(devices[0].device_type, "usw");
    assert!(devices[0].adopted);
    assert_eq!(devices[0].state, 1);
}

#[tokio::test]
async fn test_missing_data_is_empty() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("stat/health")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meta": { "rc": "ok" } })))
        .mount(&server)
        .await;

    let data: Vec<serde_json::Value> = session
        .get(Scope::Site("default"), "stat/health", &[])
        .await
        .unwrap();
    assert!(data.is_empty());
}

#[tokio::test]
async fn test_query_params_are_forwarded() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("stat/event")))
        .and(query_param("_limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{}] })))
        .expect(1)
        .mount(&server)
        .await;

    let events: Vec<serde_json::Value> = session
        .get(Scope::Site("default"), "stat/event", &[("_limit", "5")])
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_controller_scope_lists_sites() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/proxy/network/api/self/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "_id": "s1", "name": "default", "desc": "Default" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sites: Vec<serde_json::Value> = session
        .get(Scope::Controller, "self/sites", &[])
        .await
        .unwrap();
    assert_eq!(sites[0]["desc"], "Default");
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_non_success_status_is_request_error() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let result: Result<Vec<RawDevice>, _> =
        session.get(Scope::Site("default"), "stat/device", &[]).await;

    match result {
        Err(Error::Request { status, ref body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "unauthorized");
        }
        other => panic!("expected Request error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_envelope_error_rc() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("stat/device")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "rc": "error", "msg": "api.err.InvalidObject" },
            "data": []
        })))
        .mount(&server)
        .await;

    let result: Result<Vec<RawDevice>, _> =
        session.get(Scope::Site("default"), "stat/device", &[]).await;

    match result {
        Err(Error::Api { ref message }) => {
            assert!(
                message.contains("InvalidObject"),
                "expected 'InvalidObject' in message, got: {message}"
            );
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unifi_os_error_body_with_200() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path(site_path("cmd/stamgr")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": 403, "message": "Forbidden" }
        })))
        .mount(&server)
        .await;

    let result: Result<Vec<serde_json::Value>, _> = session
        .post(Scope::Site("default"), "cmd/stamgr", &json!({ "cmd": "block-sta" }))
        .await;

    assert!(
        matches!(result, Err(Error::Api { ref message }) if message.contains("403")),
        "expected Api error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("stat/sta")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result: Result<Vec<serde_json::Value>, _> =
        session.get(Scope::Site("default"), "stat/sta", &[]).await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
