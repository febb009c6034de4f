//! Static descriptors for every Routing Director endpoint the tools call.
//!
//! Paths are relative to the RD base URL. `{org}` is replaced by the configured
//! organisation id; any other `{name}` placeholder is filled from the path
//! parameters supplied by the tool.

use super::envelope::{FailurePolicy, Normalization};
use super::error::{RdError, RdResult};

/// HTTP methods used against RD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        })
    }
}

/// Status codes an endpoint treats as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessCodes {
    /// Any 2xx status.
    Any2xx,
    /// Only the listed statuses.
    Only(&'static [u16]),
}

impl SuccessCodes {
    pub fn accepts(&self, status: u16) -> bool {
        match self {
            Self::Any2xx => (200..300).contains(&status),
            Self::Only(codes) => codes.contains(&status),
        }
    }
}

/// Selects the timeout applied to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestWeight {
    /// Reads and light writes (read timeout, 30 s by default).
    Read,
    /// Provisioning writes (write timeout, 60 s by default).
    Write,
}

/// One RD endpoint: where it lives and how its responses are shaped.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: &'static str,
    pub success: SuccessCodes,
    pub weight: RequestWeight,
    pub normalization: Normalization,
    pub policy: FailurePolicy,
}

impl Endpoint {
    const fn new(path: &'static str, normalization: Normalization, policy: FailurePolicy) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            success: SuccessCodes::Any2xx,
            weight: RequestWeight::Read,
            normalization,
            policy,
        }
    }

    const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    const fn with_weight(mut self, weight: RequestWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Render the path for `org_id`, filling named placeholders from `params`.
    ///
    /// Parameter values must be single, non-blank path segments.
    pub fn render(&self, org_id: &str, params: &[(&str, &str)]) -> RdResult<String> {
        let mut path = self.path.replace("{org}", org_id);

        for (name, value) in params {
            validate_segment(name, value)?;
            let placeholder = format!("{{{}}}", name);
            if !path.contains(&placeholder) {
                return Err(RdError::invalid_request(format!(
                    "Endpoint {} has no '{}' parameter",
                    self.path, name
                )));
            }
            path = path.replace(&placeholder, value.trim());
        }

        if let Some(start) = path.find('{') {
            let missing = path[start..].split('}').next().unwrap_or_default();
            return Err(RdError::invalid_request(format!(
                "Missing path parameter {}}}",
                missing
            )));
        }

        Ok(path)
    }
}

fn validate_segment(name: &str, value: &str) -> RdResult<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RdError::invalid_request(format!("'{}' must not be empty", name)));
    }
    if value.contains(['/', '?', '#']) {
        return Err(RdError::invalid_request(format!(
            "'{}' contains a reserved character: {}",
            name, value
        )));
    }
    Ok(())
}

/// Login endpoint, answered with a session token.
pub const LOGIN_PATH: &str = "api/v1/login";

/// Status codes accepted from the login endpoint.
pub const LOGIN_SUCCESS: SuccessCodes = SuccessCodes::Only(&[200, 201]);

// ============================================================================
// Alerts & alarms
// ============================================================================

pub const ALERTS: Endpoint = Endpoint::new(
    "alert-manager/api/v1/orgs/{org}/alerts",
    Normalization::ItemsOrWhole,
    FailurePolicy::Strict,
);

pub const ACK_ALERTS: Endpoint = Endpoint::new(
    "alert-manager/api/v1/orgs/{org}/ack",
    Normalization::PassThrough,
    FailurePolicy::Detailed,
)
.with_method(HttpMethod::Post);

pub const ORG_ALARMS: Endpoint = Endpoint::new(
    "api/v1/orgs/{org}/alarms/search",
    Normalization::PassThrough,
    FailurePolicy::Strict,
);

// ============================================================================
// Inventory
// ============================================================================

pub const DEVICE_SERIES: Endpoint = Endpoint::new(
    "api/v1/devicemodel/device-series",
    Normalization::WrapList("device_series"),
    FailurePolicy::Strict,
);

pub const INVENTORY: Endpoint = Endpoint::new(
    "api/v1/orgs/{org}/inventory",
    Normalization::WrapList("devices"),
    FailurePolicy::Strict,
);

pub const SITES: Endpoint = Endpoint::new(
    "api/v1/orgs/{org}/sites",
    Normalization::WrapList("sites"),
    FailurePolicy::Strict,
);

// ============================================================================
// Health & routing
// ============================================================================

pub const CLUSTER_HEALTH: Endpoint = Endpoint::new(
    "api/v1/infra/healthcheck/",
    Normalization::PassThrough,
    FailurePolicy::Strict,
);

pub const BGP_PEERS: Endpoint = Endpoint::new(
    "routingbot/api/v1/orgs/{org}/bgp-peers",
    Normalization::PassThrough,
    FailurePolicy::Strict,
);

pub const BGP_STATUS: Endpoint = Endpoint::new(
    "routingbot/api/v1/orgs/{org}/peer-status",
    Normalization::PassThrough,
    FailurePolicy::Strict,
);

pub const ACTIVE_ASSURANCE: Endpoint = Endpoint::new(
    "active-assurance/api/v2/orgs/{org}/monitors",
    Normalization::PassThrough,
    FailurePolicy::Strict,
);

// ============================================================================
// Service orchestration
// ============================================================================

pub const CUSTOMERS: Endpoint = Endpoint::new(
    "service-orchestration/api/v1/installer/orgs/{org}/order/customers",
    Normalization::PassThrough,
    FailurePolicy::Strict,
);

pub const CREATE_CUSTOMER: Endpoint = Endpoint::new(
    "service-orchestration/api/v1/orgs/{org}/order/customers",
    Normalization::PassThrough,
    FailurePolicy::Nullable,
)
.with_method(HttpMethod::Post);

// ============================================================================
// Topology & TE-LSPs
// ============================================================================

pub const TOPOLOGIES: Endpoint = Endpoint::new(
    "topology/api/v1/orgs/{org}/topologies",
    Normalization::WrapList("topologies"),
    FailurePolicy::Soft,
);

pub const TOPOLOGY_NODES: Endpoint = Endpoint::new(
    "topology/api/v1/orgs/{org}/topologies/{topology_id}/nodes",
    Normalization::WrapList("nodes"),
    FailurePolicy::Soft,
);

pub const CREATE_TE_LSP: Endpoint = Endpoint::new(
    "topology/api/v1/orgs/{org}/te-lsps",
    Normalization::PassThrough,
    FailurePolicy::Soft,
)
.with_method(HttpMethod::Post)
.with_weight(RequestWeight::Write);

pub const TE_LSPS: Endpoint = Endpoint::new(
    "topology/api/v1/orgs/{org}/te-lsps",
    Normalization::WrapList("te_lsps"),
    FailurePolicy::Soft,
);

pub const TE_LSP: Endpoint = Endpoint::new(
    "topology/api/v1/orgs/{org}/te-lsps/{lsp_id}",
    Normalization::PassThrough,
    FailurePolicy::Soft,
);

pub const DELETE_TE_LSP: Endpoint = TE_LSP.with_method(HttpMethod::Delete);

pub const TE_LSP_HISTORY: Endpoint = Endpoint::new(
    "topology/api/v1/orgs/{org}/te-lsps/{lsp_id}/history",
    Normalization::WrapList("history"),
    FailurePolicy::Soft,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_org_path() {
        let path = SITES.render("org-1", &[]).unwrap();
        assert_eq!(path, "api/v1/orgs/org-1/sites");
    }

    #[test]
    fn test_render_named_params() {
        let path = TE_LSP_HISTORY.render("org-1", &[("lsp_id", "lsp-42")]).unwrap();
        assert_eq!(path, "topology/api/v1/orgs/org-1/te-lsps/lsp-42/history");
    }

    #[test]
    fn test_render_rejects_bad_segments() {
        assert!(TE_LSP.render("org-1", &[("lsp_id", "")]).is_err());
        assert!(TE_LSP.render("org-1", &[("lsp_id", "../admin")]).is_err());
        assert!(TE_LSP.render("org-1", &[("lsp_id", "a?b=1")]).is_err());
    }

    #[test]
    fn test_render_missing_and_unknown_params() {
        let err = TOPOLOGY_NODES.render("org-1", &[]).unwrap_err();
        assert!(err.to_string().contains("{topology_id}"));

        assert!(SITES.render("org-1", &[("lsp_id", "x")]).is_err());
    }

    #[test]
    fn test_success_codes() {
        assert!(SuccessCodes::Any2xx.accepts(204));
        assert!(!SuccessCodes::Any2xx.accepts(302));
        assert!(LOGIN_SUCCESS.accepts(201));
        assert!(!LOGIN_SUCCESS.accepts(204));
    }

    #[test]
    fn test_descriptor_shapes() {
        assert_eq!(DELETE_TE_LSP.method, HttpMethod::Delete);
        assert_eq!(DELETE_TE_LSP.path, TE_LSP.path);
        assert_eq!(CREATE_TE_LSP.weight, RequestWeight::Write);
        assert_eq!(ACK_ALERTS.method, HttpMethod::Post);
        assert_eq!(CREATE_CUSTOMER.policy, FailurePolicy::Nullable);
    }
}
