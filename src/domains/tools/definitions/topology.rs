//! Topology node listing tool.

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

use crate::core::rd::{RdClient, RdResult, endpoints::TOPOLOGY_NODES};

use super::common::{parse_params, tool_result};

/// Parameters for listing the nodes of a topology.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TopologyNodesParams {
    #[schemars(description = "Identifier of the topology, as returned by get_topologies")]
    pub topology_id: String,
}

/// List the nodes of one network topology.
pub struct TopologyNodesTool;

impl TopologyNodesTool {
    pub const NAME: &'static str = "get_topology_nodes";

    pub const DESCRIPTION: &'static str = "List the nodes of a network topology. Returns {nodes, total}, or {success: false, status_code, error} when Routing Director rejects the request.";

    pub async fn call(client: &RdClient, params: &TopologyNodesParams) -> RdResult<Value> {
        let topology_id = params.topology_id.trim();
        client
            .call(
                Self::NAME,
                &TOPOLOGY_NODES,
                &[("topology_id", topology_id)],
                None,
            )
            .await
    }

    #[instrument(skip_all, fields(topology_id = %params.topology_id))]
    pub async fn execute(client: &RdClient, params: &TopologyNodesParams) -> CallToolResult {
        info!("Listing nodes of topology {}", params.topology_id);
        tool_result(Self::NAME, Self::call(client, params).await)
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: Value,
        client: &RdClient,
    ) -> Result<Value, crate::domains::tools::ToolError> {
        let params: TopologyNodesParams = super::common::parse_http_params(arguments)?;
        Ok(super::common::http_response(
            Self::execute(client, &params).await,
        ))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<TopologyNodesParams>(),
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
                let params: TopologyNodesParams = parse_params(args)?;
                Ok(Self::execute(&client, &params).await)
            }
            .boxed()
        })
    }
}
