//! Credential resolution with a write-once token cache.
//!
//! The first successful resolution is kept for the lifetime of the resolver
//! and returned unchanged afterwards: no expiry detection, no refresh. A failed
//! resolution leaves the cache empty so the next tool call tries again.

use std::time::Duration;

use serde_json::{Value, json};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use super::credentials::{AuthHeaders, Credential, extract_session_token, login_headers};
use super::endpoints::{LOGIN_PATH, LOGIN_SUCCESS};
use super::error::AuthError;

/// Resolves RD auth headers once and hands out the cached copy afterwards.
pub struct AuthResolver {
    http: reqwest::Client,
    login_url: String,
    credential: Option<Credential>,
    timeout: Duration,
    cache: OnceCell<AuthHeaders>,
}

impl AuthResolver {
    /// Create a resolver for the RD instance at `base_url`.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        credential: Option<Credential>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            login_url: format!("{}/{}", base_url.trim_end_matches('/'), LOGIN_PATH),
            credential,
            timeout,
            cache: OnceCell::new(),
        }
    }

    /// The configured credential, if any.
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Headers cached by an earlier successful resolution.
    pub fn cached(&self) -> Option<&AuthHeaders> {
        self.cache.get()
    }

    /// Return the auth headers, logging in first if nothing is cached yet.
    ///
    /// Concurrent first calls wait on the same initialization, so at most one
    /// login is in flight.
    pub async fn resolve(&self) -> Result<AuthHeaders, AuthError> {
        if let Some(headers) = self.cache.get() {
            debug!("Using cached RD auth headers");
            return Ok(headers.clone());
        }

        self.cache
            .get_or_try_init(|| self.authenticate())
            .await
            .cloned()
    }

    async fn authenticate(&self) -> Result<AuthHeaders, AuthError> {
        match &self.credential {
            Some(Credential::StaticToken(token)) => {
                info!("Authenticating to Routing Director with static API token");
                Ok(AuthHeaders::Token(token.clone()))
            }
            Some(Credential::Login { email, password }) => self.login(email, password).await,
            None => {
                warn!("No Routing Director credential configured");
                Err(AuthError::NoCredentials)
            }
        }
    }

    #[instrument(skip(self, password), fields(url = %self.login_url))]
    async fn login(&self, email: &str, password: &str) -> Result<AuthHeaders, AuthError> {
        info!("Logging in to Routing Director as {}", email);

        let response = self
            .http
            .post(&self.login_url)
            .headers(login_headers())
            .json(&json!({ "email": email, "password": password }))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(AuthError::Request)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(AuthError::Request)?;

        if !LOGIN_SUCCESS.accepts(status) {
            warn!("Routing Director login rejected with status {}", status);
            return Err(AuthError::Rejected { status, body });
        }

        let parsed: Value = serde_json::from_str(&body).map_err(AuthError::MalformedResponse)?;
        let token = extract_session_token(&parsed).ok_or_else(|| AuthError::MissingToken {
            response: redact_login_response(&parsed),
        })?;

        info!("Routing Director login succeeded");
        Ok(AuthHeaders::Session(token.to_string()))
    }
}

// Only the top-level keys are echoed so nothing secret ends up in an error.
fn redact_login_response(body: &Value) -> String {
    match body.as_object() {
        Some(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on port 1; any network attempt fails fast.
    const UNREACHABLE: &str = "http://127.0.0.1:1";

    fn resolver(credential: Option<Credential>) -> AuthResolver {
        AuthResolver::new(
            reqwest::Client::new(),
            UNREACHABLE,
            credential,
            Duration::from_secs(2),
        )
    }

    #[tokio::test]
    async fn test_static_token_needs_no_network() {
        let resolver = resolver(Some(Credential::StaticToken("abc".to_string())));
        let headers = resolver.resolve().await.unwrap();
        assert_eq!(headers, AuthHeaders::Token("abc".to_string()));
        assert_eq!(resolver.cached(), Some(&headers));
    }

    #[tokio::test]
    async fn test_no_credentials() {
        let resolver = resolver(None);
        let err = resolver.resolve().await.unwrap_err();
        assert!(matches!(err, AuthError::NoCredentials));
        assert!(resolver.cached().is_none());
    }

    #[tokio::test]
    async fn test_login_transport_failure_leaves_cache_empty() {
        let resolver = resolver(Some(Credential::Login {
            email: "ops@example.com".to_string(),
            password: "pw".to_string(),
        }));
        let err = resolver.resolve().await.unwrap_err();
        assert!(matches!(err, AuthError::Request(_)));
        assert!(resolver.cached().is_none());
    }

    #[test]
    fn test_login_url() {
        let resolver = AuthResolver::new(
            reqwest::Client::new(),
            "https://rd.example.net/",
            None,
            Duration::from_secs(1),
        );
        assert_eq!(resolver.login_url, "https://rd.example.net/api/v1/login");
    }

    #[test]
    fn test_redact_login_response() {
        let summary = redact_login_response(&json!({"user": "x", "refresh": "secret"}));
        assert!(summary.contains("refresh") && summary.contains("user"));
        assert!(!summary.contains("secret"));
    }
}
