//! Configuration management for the MCP server.
//!
//! Configuration is populated from defaults, an optional `.env` file and
//! environment variables. MCP server settings use the `MCP_` prefix; the
//! Routing Director connection uses the `RD_` prefix.

use super::rd::Credential;
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Routing Director connection settings.
    pub rd: RdConfig,

    /// Routing Director credentials.
    pub credentials: CredentialsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Routing Director connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdConfig {
    /// RD host name or IP address; the base URL becomes `https://<server>`.
    pub server: Option<String>,

    /// Full base URL, overriding `server` (e.g. a proxy or a plain-HTTP lab).
    pub base_url: Option<String>,

    /// Organisation id substituted into org-scoped paths.
    pub org_id: String,

    /// Skip TLS certificate verification (RD usually runs with self-signed certs).
    pub accept_invalid_certs: bool,

    /// Timeout for reads and light writes, in seconds.
    pub read_timeout_secs: u64,

    /// Timeout for provisioning writes, in seconds.
    pub write_timeout_secs: u64,
}

impl RdConfig {
    /// Base URL without a trailing slash, if the RD host is configured.
    pub fn base_url(&self) -> Option<String> {
        let explicit = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(|u| u.trim_end_matches('/').to_string());

        explicit.or_else(|| {
            self.server
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| format!("https://{}", s.trim_end_matches('/')))
        })
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

impl Default for RdConfig {
    fn default() -> Self {
        Self {
            server: None,
            base_url: None,
            org_id: String::new(),
            accept_invalid_certs: true,
            read_timeout_secs: 30,
            write_timeout_secs: 60,
        }
    }
}

/// Routing Director credentials.
///
/// A static API token takes precedence; otherwise email/password are used
/// to log in.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Pre-issued API token.
    pub api_token: Option<String>,

    /// Login email (RD uses email as the login name).
    pub email: Option<String>,

    /// Login password.
    pub password: Option<String>,
}

impl CredentialsConfig {
    /// The credential these settings resolve to, if any.
    pub fn credential(&self) -> Option<Credential> {
        Credential::from_parts(
            self.api_token.as_deref(),
            self.email.as_deref(),
            self.password.as_deref(),
        )
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "routing-director-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            rd: RdConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_secs(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}s", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first, if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        config.rd.server = env_nonempty("RD_SERVER");
        config.rd.base_url = env_nonempty("RD_BASE_URL");
        match config.rd.base_url() {
            Some(url) => info!("Routing Director base URL: {}", url),
            None => warn!("RD_SERVER and RD_BASE_URL not set - server start-up will fail"),
        }

        match env_nonempty("RD_ORG_ID") {
            Some(org_id) => config.rd.org_id = org_id,
            None => warn!("RD_ORG_ID not set - organisation-scoped tools will fail"),
        }

        if let Ok(flag) = std::env::var("RD_ACCEPT_INVALID_CERTS") {
            config.rd.accept_invalid_certs = flag.to_lowercase() != "false" && flag != "0";
        }

        config.rd.read_timeout_secs = env_secs("RD_READ_TIMEOUT_SECS", config.rd.read_timeout_secs);
        config.rd.write_timeout_secs =
            env_secs("RD_WRITE_TIMEOUT_SECS", config.rd.write_timeout_secs);

        config.credentials.api_token = env_nonempty("RD_API_TOKEN");
        config.credentials.email = env_nonempty("RD_EMAIL");
        config.credentials.password = std::env::var("RD_PASSWORD").ok();

        match config.credentials.credential() {
            Some(credential) => info!("Routing Director credential: {}", credential.kind()),
            None => warn!(
                "No Routing Director credential found. Set RD_API_TOKEN, \
                 or RD_EMAIL and RD_PASSWORD"
            ),
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const RD_VARS: &[&str] = &[
        "RD_SERVER",
        "RD_BASE_URL",
        "RD_ORG_ID",
        "RD_API_TOKEN",
        "RD_EMAIL",
        "RD_PASSWORD",
        "RD_READ_TIMEOUT_SECS",
        "RD_WRITE_TIMEOUT_SECS",
        "RD_ACCEPT_INVALID_CERTS",
    ];

    fn clear_rd_env() {
        for var in RD_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_rd_settings_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_rd_env();
        unsafe {
            std::env::set_var("RD_SERVER", "10.0.0.5");
            std::env::set_var("RD_ORG_ID", "org-7");
            std::env::set_var("RD_WRITE_TIMEOUT_SECS", "90");
            std::env::set_var("RD_ACCEPT_INVALID_CERTS", "false");
        }
        let config = Config::from_env();
        assert_eq!(config.rd.base_url().as_deref(), Some("https://10.0.0.5"));
        assert_eq!(config.rd.org_id, "org-7");
        assert_eq!(config.rd.write_timeout(), Duration::from_secs(90));
        assert_eq!(config.rd.read_timeout(), Duration::from_secs(30));
        assert!(!config.rd.accept_invalid_certs);
        clear_rd_env();
    }

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_rd_env();
        unsafe {
            std::env::set_var("RD_EMAIL", "ops@example.com");
            std::env::set_var("RD_PASSWORD", "pw");
        }
        let config = Config::from_env();
        assert!(matches!(
            config.credentials.credential(),
            Some(Credential::Login { .. })
        ));

        unsafe {
            std::env::set_var("RD_API_TOKEN", "tok-123");
        }
        let config = Config::from_env();
        assert_eq!(
            config.credentials.credential(),
            Some(Credential::StaticToken("tok-123".to_string()))
        );
        clear_rd_env();
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_rd_env();
        unsafe {
            std::env::set_var("RD_READ_TIMEOUT_SECS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.rd.read_timeout_secs, 30);
        clear_rd_env();
    }

    #[test]
    fn test_base_url_override() {
        let rd = RdConfig {
            server: Some("10.0.0.5".to_string()),
            base_url: Some("http://127.0.0.1:9000/".to_string()),
            ..RdConfig::default()
        };
        assert_eq!(rd.base_url().as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(RdConfig::default().base_url(), None);
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            api_token: Some("super_secret_token".to_string()),
            email: Some("ops@example.com".to_string()),
            password: Some("hunter2".to_string()),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
        assert!(!debug_str.contains("hunter2"));
    }
}
