//! Parameterless read tools.
//!
//! These tools differ only in name, description and endpoint, so they are
//! declared as a table and share one implementation. Each entry GETs its
//! endpoint and returns the normalized body.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::core::rd::{Endpoint, RdClient, RdResult, endpoints};

use super::common::tool_result;

/// Input schema for tools that take no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// A read-only tool backed by a single GET endpoint.
#[derive(Debug)]
pub struct ReadTool {
    pub name: &'static str,
    pub description: &'static str,
    pub endpoint: Endpoint,
}

/// Every parameterless read tool.
pub static READ_TOOLS: &[ReadTool] = &[
    ReadTool {
        name: "get_alert",
        description: "Get active alerts from the Routing Director alert manager for the organisation.",
        endpoint: endpoints::ALERTS,
    },
    ReadTool {
        name: "get_device_series",
        description: "List the device series supported by Routing Director. Returns {device_series, total}.",
        endpoint: endpoints::DEVICE_SERIES,
    },
    ReadTool {
        name: "get_org_alarms",
        description: "Search the organisation's alarms.",
        endpoint: endpoints::ORG_ALARMS,
    },
    ReadTool {
        name: "get_inventory",
        description: "Get the organisation's device inventory. Returns {devices, total}.",
        endpoint: endpoints::INVENTORY,
    },
    ReadTool {
        name: "get_sites",
        description: "Get the organisation's sites. Returns {sites, total}.",
        endpoint: endpoints::SITES,
    },
    ReadTool {
        name: "get_cluster_health",
        description: "Run the Routing Director cluster health check.",
        endpoint: endpoints::CLUSTER_HEALTH,
    },
    ReadTool {
        name: "get_bgp_peer",
        description: "Get the number of BGP peers seen by Routing Director.",
        endpoint: endpoints::BGP_PEERS,
    },
    ReadTool {
        name: "get_bgp_status",
        description: "Get the session status of the organisation's BGP peers.",
        endpoint: endpoints::BGP_STATUS,
    },
    ReadTool {
        name: "get_customers",
        description: "List the customers known to Routing Director service orchestration.",
        endpoint: endpoints::CUSTOMERS,
    },
    ReadTool {
        name: "get_active_assurance",
        description: "List the active assurance test monitors configured in Routing Director.",
        endpoint: endpoints::ACTIVE_ASSURANCE,
    },
    ReadTool {
        name: "get_topologies",
        description: "List network topologies. Returns {topologies, total}, or {success: false, status_code, error} when Routing Director rejects the request.",
        endpoint: endpoints::TOPOLOGIES,
    },
    ReadTool {
        name: "list_te_lsps",
        description: "List provisioned TE-LSPs. Returns {te_lsps, total}, or {success: false, status_code, error} when Routing Director rejects the request.",
        endpoint: endpoints::TE_LSPS,
    },
];

impl ReadTool {
    /// Look up a read tool by name.
    pub fn find(name: &str) -> Option<&'static ReadTool> {
        READ_TOOLS.iter().find(|tool| tool.name == name)
    }

    /// Call the endpoint and return the settled envelope.
    pub async fn call(&self, client: &RdClient) -> RdResult<Value> {
        client.call(self.name, &self.endpoint, &[], None).await
    }

    /// Execute the tool logic (for STDIO transport via rmcp).
    #[instrument(skip_all, fields(tool = self.name))]
    pub async fn execute(&self, client: &RdClient) -> CallToolResult {
        info!("{} called", self.name);
        tool_result(self.name, self.call(client).await)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(&self, client: &RdClient) -> serde_json::Value {
        super::common::http_response(self.execute(client).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: cached_schema_for_type::<NoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO transport. Arguments are ignored.
    pub fn create_route<S>(&'static self, client: Arc<RdClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(self.to_tool(), move |_ctx: ToolCallContext<'_, S>| {
            let client = client.clone();
            async move { Ok(self.execute(&client).await) }.boxed()
        })
    }
}
