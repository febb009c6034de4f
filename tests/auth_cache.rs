//! Authentication and token-cache behaviour against a mock Routing Director.

mod common;

use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::{Value, json};

use common::{client, login_credentials, session, spawn, token_credentials, with_login};
use routing_director_mcp_server::core::rd::{AuthError, AuthHeaders, RdError};
use routing_director_mcp_server::domains::tools::definitions::ReadTool;

fn sites_app() -> Router {
    Router::new().route(
        "/api/v1/orgs/org-1/sites",
        get(|| async { Json(json!([{"name": "hq"}])) }),
    )
}

#[tokio::test]
async fn login_once_then_cached() {
    let (app, logins) = with_login(sites_app(), StatusCode::OK, session("abc"));
    let base = spawn(app).await;
    let client = client(&base, login_credentials());

    let headers = client.auth().resolve().await.unwrap();
    assert_eq!(headers, AuthHeaders::Session("abc".to_string()));

    let sites = ReadTool::find("get_sites").unwrap();
    for _ in 0..5 {
        let body = sites.call(&client).await.unwrap();
        assert_eq!(body["total"], 1);
    }

    assert_eq!(logins.hits(), 1);
    assert_eq!(
        client.auth().cached(),
        Some(&AuthHeaders::Session("abc".to_string()))
    );
}

#[tokio::test]
async fn concurrent_first_calls_share_one_login() {
    let (app, logins) = with_login(sites_app(), StatusCode::OK, session("abc"));
    let base = spawn(app).await;
    let client = client(&base, login_credentials());

    let sites = ReadTool::find("get_sites").unwrap();
    let (a, b, c) = tokio::join!(sites.call(&client), sites.call(&client), sites.call(&client));
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(logins.hits(), 1);
}

#[tokio::test]
async fn token_field_fallbacks() {
    let (app, _) = with_login(Router::new(), StatusCode::CREATED, json!({"authToken": "xyz"}));
    let base = spawn(app).await;
    let client = client(&base, login_credentials());

    let headers = client.auth().resolve().await.unwrap();
    assert_eq!(headers, AuthHeaders::Session("xyz".to_string()));
}

#[tokio::test]
async fn missing_token_lists_keys_only() {
    let body = json!({"user": "ops", "refresh_secret": "do-not-leak"});
    let (app, _) = with_login(Router::new(), StatusCode::OK, body);
    let base = spawn(app).await;
    let client = client(&base, login_credentials());

    let err = client.auth().resolve().await.unwrap_err();
    assert!(matches!(err, AuthError::MissingToken { .. }));
    let msg = err.to_string();
    assert!(msg.contains("refresh_secret"));
    assert!(!msg.contains("do-not-leak"));
}

#[tokio::test]
async fn rejected_login_does_not_poison_cache() {
    let (app, logins) = with_login(
        sites_app(),
        StatusCode::UNAUTHORIZED,
        json!({"detail": "bad credentials"}),
    );
    let base = spawn(app).await;
    let client = client(&base, login_credentials());

    let err = client.auth().resolve().await.unwrap_err();
    match err {
        AuthError::Rejected { status, ref body } => {
            assert_eq!(status, 401);
            assert!(body.contains("bad credentials"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(client.auth().cached().is_none());

    // Strict tool: the auth failure propagates and the next call logs in again.
    let sites = ReadTool::find("get_sites").unwrap();
    let err = sites.call(&client).await.unwrap_err();
    assert!(matches!(err, RdError::Auth(AuthError::Rejected { .. })));
    assert_eq!(logins.hits(), 2);
}

#[tokio::test]
async fn static_token_never_logs_in() {
    let (app, logins) = with_login(sites_app(), StatusCode::OK, session("unused"));
    let base = spawn(app).await;
    let client = client(&base, token_credentials());

    let sites = ReadTool::find("get_sites").unwrap();
    sites.call(&client).await.unwrap();
    sites.call(&client).await.unwrap();

    assert_eq!(logins.hits(), 0);
    assert_eq!(
        client.auth().cached(),
        Some(&AuthHeaders::Token("static-token".to_string()))
    );
}

#[tokio::test]
async fn placeholder_token_falls_back_to_login() {
    let (app, logins) = with_login(sites_app(), StatusCode::OK, session("abc"));
    let base = spawn(app).await;
    let mut credentials = login_credentials();
    credentials.api_token = Some("YOUR_TOKEN".to_string());
    let client = client(&base, credentials);

    let body: Value = ReadTool::find("get_sites").unwrap().call(&client).await.unwrap();
    assert_eq!(body["sites"][0]["name"], "hq");
    assert_eq!(logins.hits(), 1);
}

#[tokio::test]
async fn non_json_login_body_is_malformed() {
    let app = Router::new().route("/api/v1/login", axum::routing::post(|| async { "ok" }));
    let base = spawn(app).await;
    let client = client(&base, login_credentials());

    let err = client.auth().resolve().await.unwrap_err();
    assert!(matches!(err, AuthError::MalformedResponse(_)));
    assert!(client.auth().cached().is_none());
}
