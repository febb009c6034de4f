//! TE-LSP provisioning tool.
//!
//! Arguments are validated locally before anything is sent; a rejected
//! request never reaches the network and comes back as `{error}`.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::core::rd::{RdClient, RdError, RdResult, endpoints::CREATE_TE_LSP};

use super::super::common::{parse_params, tool_result};

/// Highest RSVP setup/hold priority (0 is the strongest).
pub const MAX_PRIORITY: u8 = 7;

/// How the LSP path is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// Path computed by the controller.
    #[default]
    Dynamic,
    /// Path pinned to `explicit_hops`.
    Explicit,
}

/// Parameters for provisioning a TE-LSP.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateTeLspParams {
    #[schemars(description = "Name of the LSP")]
    pub name: String,

    #[schemars(description = "Ingress node (hostname or router ID)")]
    pub source: String,

    #[schemars(description = "Egress node (hostname or router ID)")]
    pub destination: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Reserved bandwidth in bits per second")]
    pub bandwidth: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Setup priority, 0 (highest) to 7 (lowest)")]
    pub setup_priority: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Hold priority, 0 (highest) to 7 (lowest)")]
    pub hold_priority: Option<u8>,

    #[serde(default)]
    #[schemars(description = "Path computation: 'dynamic' (default) or 'explicit'")]
    pub path_type: PathType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schemars(description = "Ordered hops, required when path_type is 'explicit'")]
    pub explicit_hops: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Optional description")]
    pub description: Option<String>,
}

impl CreateTeLspParams {
    /// Check the arguments before they are sent to RD.
    pub fn validate(&self) -> RdResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("source", &self.source),
            ("destination", &self.destination),
        ] {
            if value.trim().is_empty() {
                return Err(RdError::invalid_request(format!("{field} must not be empty")));
            }
        }

        for (field, priority) in [
            ("setup_priority", self.setup_priority),
            ("hold_priority", self.hold_priority),
        ] {
            if let Some(p) = priority.filter(|p| *p > MAX_PRIORITY) {
                return Err(RdError::invalid_request(format!(
                    "{field} must be between 0 and {MAX_PRIORITY}, got {p}"
                )));
            }
        }

        if self.path_type == PathType::Explicit
            && self.explicit_hops.iter().all(|hop| hop.trim().is_empty())
        {
            return Err(RdError::invalid_request(
                "explicit_hops must list at least one hop when path_type is 'explicit'",
            ));
        }

        Ok(())
    }

    /// Request body: the parameters with absent optionals omitted.
    pub fn payload(&self) -> RdResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Provision a TE-LSP.
pub struct CreateTeLspTool;

impl CreateTeLspTool {
    pub const NAME: &'static str = "create_te_lsp";

    pub const DESCRIPTION: &'static str = "Provision a Traffic-Engineered LSP between two nodes. Supports bandwidth reservation, setup/hold priorities (0-7) and dynamic or explicit paths. Returns the created LSP, or {success: false, status_code, error} when Routing Director rejects the request.";

    pub async fn call(client: &RdClient, params: &CreateTeLspParams) -> RdResult<Value> {
        let payload = match params.validate().and_then(|()| params.payload()) {
            Ok(payload) => payload,
            Err(e) => return CREATE_TE_LSP.policy.settle(Self::NAME, Err(e)),
        };

        client
            .call(Self::NAME, &CREATE_TE_LSP, &[], Some(payload))
            .await
    }

    #[instrument(skip_all, fields(lsp = %params.name))]
    pub async fn execute(client: &RdClient, params: &CreateTeLspParams) -> CallToolResult {
        info!(
            "Creating TE-LSP {} ({} -> {})",
            params.name, params.source, params.destination
        );
        tool_result(Self::NAME, Self::call(client, params).await)
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: Value,
        client: &RdClient,
    ) -> Result<Value, crate::domains::tools::ToolError> {
        let params: CreateTeLspParams = super::super::common::parse_http_params(arguments)?;
        Ok(super::super::common::http_response(
            Self::execute(client, &params).await,
        ))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CreateTeLspParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(client: Arc<RdClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let client = client.clone();
            async move {
                let params: CreateTeLspParams = parse_params(args)?;
                Ok(Self::execute(&client, &params).await)
            }
            .boxed()
        })
    }
}
