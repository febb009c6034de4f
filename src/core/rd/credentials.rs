//! Credentials and the auth headers they resolve into.
//!
//! RD accepts two kinds of authentication:
//!
//! - a long-lived API token, sent as `Authorization: Token <token>`
//! - a session token obtained by logging in with email/password, sent as
//!   `AuthToken: <token>`
//!
//! Both shapes also carry `Content-Type: application/json` and
//! `Cache-Control: no-cache`.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use super::error::RdError;

/// Token values shipped in sample configurations. They are treated as unset.
pub const PLACEHOLDER_TOKENS: &[&str] = &["YOUR_TOKEN", "YOUR_API_TOKEN"];

/// Fields that may carry the session token in a login response, in priority order.
pub const TOKEN_FIELDS: &[&str] = &["token", "authToken", "auth_token", "access_token", "accessToken"];

const CONTENT_TYPE: &str = "application/json";
const CACHE_CONTROL: &str = "no-cache";

/// A configured way of authenticating against RD.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Pre-issued API token, used without any network call.
    StaticToken(String),

    /// Email/password pair exchanged for a session token at login.
    Login { email: String, password: String },
}

impl Credential {
    /// Pick the credential to use from the optional configured values.
    ///
    /// A real static token wins over an email/password pair. Returns `None`
    /// when neither is usable.
    pub fn from_parts(
        api_token: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Option<Self> {
        if let Some(token) = api_token.filter(|t| !is_placeholder_token(t)) {
            return Some(Self::StaticToken(token.trim().to_string()));
        }

        match (email, password) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Some(Self::Login {
                    email: email.trim().to_string(),
                    password: password.to_string(),
                })
            }
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StaticToken(_) => "static API token",
            Self::Login { .. } => "email/password login",
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaticToken(_) => f.debug_tuple("StaticToken").field(&"[REDACTED]").finish(),
            Self::Login { email, .. } => f
                .debug_struct("Login")
                .field("email", email)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Whether a configured API token is blank or one of the sample placeholders.
pub fn is_placeholder_token(token: &str) -> bool {
    let token = token.trim();
    token.is_empty() || PLACEHOLDER_TOKENS.contains(&token)
}

/// Headers sent with every RD request once authentication is resolved.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthHeaders {
    /// `Authorization: Token <token>` (static API token).
    Token(String),

    /// `AuthToken: <token>` (session token from login).
    Session(String),
}

impl AuthHeaders {
    /// Header name/value pairs in the order they are sent.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let auth = match self {
            Self::Token(token) => ("Authorization", format!("Token {}", token)),
            Self::Session(token) => ("AuthToken", token.clone()),
        };
        vec![
            auth,
            ("Content-Type", CONTENT_TYPE.to_string()),
            ("Cache-Control", CACHE_CONTROL.to_string()),
        ]
    }

    /// Convert into a `reqwest` header map.
    pub fn to_header_map(&self) -> Result<HeaderMap, RdError> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.pairs() {
            let key = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| RdError::invalid_request(format!("Invalid header name {}", name)))?;
            let mut value = HeaderValue::from_str(&value)
                .map_err(|_| RdError::invalid_request(format!("Invalid value for header {}", name)))?;
            value.set_sensitive(key == reqwest::header::AUTHORIZATION || name == "AuthToken");
            headers.insert(key, value);
        }
        Ok(headers)
    }
}

impl std::fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(_) => f.debug_tuple("Token").field(&"[REDACTED]").finish(),
            Self::Session(_) => f.debug_tuple("Session").field(&"[REDACTED]").finish(),
        }
    }
}

/// Headers sent with the login request itself.
pub fn login_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        HeaderValue::from_static(CONTENT_TYPE),
    );
    headers.insert(
        reqwest::header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL),
    );
    headers
}

/// Find the session token in a login response body.
///
/// The first field of [`TOKEN_FIELDS`] holding a non-empty string wins.
pub fn extract_session_token(body: &Value) -> Option<&str> {
    TOKEN_FIELDS
        .iter()
        .filter_map(|field| body.get(*field).and_then(Value::as_str))
        .find(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_static_token_wins_over_login() {
        let cred = Credential::from_parts(Some("abc123"), Some("ops@example.com"), Some("pw"));
        assert_eq!(cred, Some(Credential::StaticToken("abc123".to_string())));
    }

    #[test]
    fn test_placeholder_token_falls_back_to_login() {
        for placeholder in ["YOUR_TOKEN", "YOUR_API_TOKEN", "  "] {
            let cred = Credential::from_parts(Some(placeholder), Some("ops@example.com"), Some("pw"));
            assert!(matches!(cred, Some(Credential::Login { .. })), "{placeholder}");
        }
    }

    #[test]
    fn test_no_usable_credential() {
        assert!(Credential::from_parts(None, None, None).is_none());
        assert!(Credential::from_parts(Some("YOUR_TOKEN"), Some("ops@example.com"), None).is_none());
        assert!(Credential::from_parts(None, Some(""), Some("pw")).is_none());
    }

    #[test]
    fn test_token_header_shape() {
        let pairs = AuthHeaders::Token("abc".to_string()).pairs();
        assert_eq!(pairs[0], ("Authorization", "Token abc".to_string()));
        assert_eq!(pairs[1], ("Content-Type", "application/json".to_string()));
        assert_eq!(pairs[2], ("Cache-Control", "no-cache".to_string()));
    }

    #[test]
    fn test_session_header_map() {
        let headers = AuthHeaders::Session("abc".to_string()).to_header_map().unwrap();
        assert_eq!(headers.get("AuthToken").unwrap(), "abc");
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        assert!(headers.get("authorization").is_none());
    }

    #[test]
    fn test_extract_token_priority() {
        let body = json!({"access_token": "second", "authToken": "first"});
        assert_eq!(extract_session_token(&body), Some("first"));

        let body = json!({"access_token": "abc"});
        assert_eq!(extract_session_token(&body), Some("abc"));

        let body = json!({"token": "", "accessToken": "late"});
        assert_eq!(extract_session_token(&body), Some("late"));
    }

    #[test]
    fn test_extract_token_missing() {
        assert_eq!(extract_session_token(&json!({"jwt": "x", "token": 42})), None);
        assert_eq!(extract_session_token(&json!([])), None);
    }

    #[test]
    fn test_secrets_redacted_in_debug() {
        let cred = Credential::Login {
            email: "ops@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug_str = format!("{:?} {:?}", cred, AuthHeaders::Session("s3cret".to_string()));
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("hunter2"));
        assert!(!debug_str.contains("s3cret"));
    }
}
