//! Shared helpers for integration tests: a mock Routing Director API.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use routing_director_mcp_server::core::config::{CredentialsConfig, RdConfig};
use routing_director_mcp_server::core::rd::RdClient;

pub const ORG: &str = "org-1";

/// Counts hits on the mock login endpoint.
#[derive(Clone, Default)]
pub struct LoginCounter(Arc<AtomicUsize>);

impl LoginCounter {
    pub fn hits(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Add a login route answering `status` with `body`, counting every hit.
pub fn with_login(app: Router, status: StatusCode, body: Value) -> (Router, LoginCounter) {
    let counter = LoginCounter::default();
    let state = (counter.clone(), status, body);
    let route = Router::new()
        .route(
            "/api/v1/login",
            post(
                |State((counter, status, body)): State<(LoginCounter, StatusCode, Value)>| async move {
                    counter.0.fetch_add(1, Ordering::SeqCst);
                    (status, Json(body))
                },
            ),
        )
        .with_state(state);
    (app.merge(route), counter)
}

pub fn token_credentials() -> CredentialsConfig {
    CredentialsConfig {
        api_token: Some("static-token".to_string()),
        ..CredentialsConfig::default()
    }
}

pub fn login_credentials() -> CredentialsConfig {
    CredentialsConfig {
        email: Some("ops@example.net".to_string()),
        password: Some("secret".to_string()),
        ..CredentialsConfig::default()
    }
}

/// Client for the mock at `base_url`, scoped to [`ORG`].
pub fn client(base_url: &str, credentials: CredentialsConfig) -> RdClient {
    RdClient::new(&rd_config(base_url), &credentials).unwrap()
}

/// Same as [`client`] with a short read timeout.
pub fn client_with_read_timeout(
    base_url: &str,
    credentials: CredentialsConfig,
    secs: u64,
) -> RdClient {
    let rd = RdConfig {
        read_timeout_secs: secs,
        ..rd_config(base_url)
    };
    RdClient::new(&rd, &credentials).unwrap()
}

fn rd_config(base_url: &str) -> RdConfig {
    RdConfig {
        base_url: Some(base_url.to_string()),
        org_id: ORG.to_string(),
        accept_invalid_certs: false,
        ..RdConfig::default()
    }
}

/// A login body carrying `token` in the `access_token` field.
pub fn session(token: &str) -> Value {
    json!({"access_token": token, "expires_in": 3600})
}

/// Decode the JSON text of a tool result.
pub fn result_json(result: &CallToolResult) -> Value {
    match &result.content[0].raw {
        RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
        _ => panic!("Expected text content"),
    }
}
