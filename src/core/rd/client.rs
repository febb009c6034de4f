//! Request executor for the Routing Director API.
//!
//! [`RdClient`] owns the pooled HTTP client and the [`AuthResolver`]. Each call
//! resolves auth headers (cached after the first success), issues exactly one
//! request and hands the decoded body to the endpoint's normalization and
//! failure policy. No retries, and redirects are not followed: a 3xx is a
//! status failure like any other.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::auth::AuthResolver;
use super::endpoints::{Endpoint, HttpMethod, RequestWeight, SuccessCodes};
use super::envelope::empty_success;
use super::error::{RdError, RdResult};
use crate::core::config::{CredentialsConfig, RdConfig};

/// A single, fully rendered request to RD.
#[derive(Debug, Clone)]
pub struct RdRequest {
    pub method: HttpMethod,
    pub path: String,
    pub payload: Option<Value>,
    pub timeout: Duration,
    pub success: SuccessCodes,
}

/// Client for one Routing Director instance.
pub struct RdClient {
    http: reqwest::Client,
    base_url: String,
    org_id: String,
    auth: AuthResolver,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl RdClient {
    /// Build a client from the RD and credentials configuration.
    pub fn new(rd: &RdConfig, credentials: &CredentialsConfig) -> RdResult<Self> {
        let base_url = rd.base_url().ok_or_else(|| {
            RdError::Client("RD_SERVER or RD_BASE_URL must be set".to_string())
        })?;

        if rd.accept_invalid_certs {
            warn!(
                "TLS certificate verification disabled for {} (RD_ACCEPT_INVALID_CERTS)",
                base_url
            );
        }

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(rd.accept_invalid_certs)
            .connect_timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| RdError::Client(e.to_string()))?;

        let credential = credentials.credential();
        match &credential {
            Some(c) => debug!("Routing Director credential: {}", c.kind()),
            None => warn!("No Routing Director credential configured; tool calls will fail"),
        }

        let auth = AuthResolver::new(http.clone(), &base_url, credential, rd.read_timeout());

        Ok(Self {
            http,
            base_url,
            org_id: rd.org_id.clone(),
            auth,
            read_timeout: rd.read_timeout(),
            write_timeout: rd.write_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    /// The credential resolver and its token cache.
    pub fn auth(&self) -> &AuthResolver {
        &self.auth
    }

    /// Absolute URL for a path relative to the RD base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn timeout_for(&self, weight: RequestWeight) -> Duration {
        match weight {
            RequestWeight::Read => self.read_timeout,
            RequestWeight::Write => self.write_timeout,
        }
    }

    /// Render `endpoint` into a request for this client's organisation.
    pub fn request(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, &str)],
        payload: Option<Value>,
    ) -> RdResult<RdRequest> {
        Ok(RdRequest {
            method: endpoint.method,
            path: endpoint.render(&self.org_id, params)?,
            payload,
            timeout: self.timeout_for(endpoint.weight),
            success: endpoint.success,
        })
    }

    /// Issue one request and decode its body.
    ///
    /// A status outside the accepted codes fails with [`RdError::Status`]
    /// carrying the response text. An empty successful body decodes to
    /// `{success: true, status_code}`.
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: RdRequest) -> RdResult<Value> {
        let headers = self.auth.resolve().await?.to_header_map()?;
        let url = self.url(&request.path);
        debug!("{} {}", request.method, url);

        let mut builder = self
            .http
            .request(request.method.as_reqwest(), &url)
            .headers(headers)
            .timeout(request.timeout);
        if let Some(payload) = &request.payload {
            builder = builder.json(payload);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if !request.success.accepts(status) {
            return Err(RdError::Status { status, body });
        }

        if body.trim().is_empty() {
            return Ok(empty_success(status));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Call `endpoint` on behalf of `tool`: render, execute, normalize, settle.
    pub async fn call(
        &self,
        tool: &str,
        endpoint: &Endpoint,
        params: &[(&str, &str)],
        payload: Option<Value>,
    ) -> RdResult<Value> {
        let outcome = match self.request(endpoint, params, payload) {
            Ok(request) => self
                .execute(request)
                .await
                .map(|body| endpoint.normalization.apply(body)),
            Err(e) => Err(e),
        };

        endpoint.policy.settle(tool, outcome)
    }
}
