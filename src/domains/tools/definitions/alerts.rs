//! Alert acknowledgement tool.
//!
//! Acknowledges alert streams in the Routing Director alert manager. Failures
//! never abort the call: RD rejections come back as
//! `{error: "HTTP <code>", details}` and anything else as `{error}`.

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

use crate::core::rd::{RdClient, RdError, RdResult, endpoints::ACK_ALERTS};

use super::common::{parse_params, tool_result};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for acknowledging alerts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AckAlertsParams {
    /// Stream ids of the alerts to acknowledge.
    #[schemars(description = "List of alert stream IDs to acknowledge")]
    pub stream_ids: Vec<String>,

    /// Optional comment recorded with the acknowledgement.
    #[serde(default)]
    #[schemars(description = "Optional comment for the acknowledgement")]
    pub comment: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Acknowledge alarms in Routing Director.
pub struct AckAlertsTool;

impl AckAlertsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ack_alerts";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Acknowledge alarms in Routing Director by stream ID, with an optional comment. On failure returns {error, details} instead of raising.";

    /// Send the acknowledgement and return the settled envelope.
    pub async fn call(client: &RdClient, params: &AckAlertsParams) -> RdResult<Value> {
        let stream_ids: Vec<&str> = params
            .stream_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .collect();

        if stream_ids.is_empty() {
            let err = RdError::invalid_request("stream_ids must contain at least one id");
            return ACK_ALERTS.policy.settle(Self::NAME, Err(err));
        }

        let payload = serde_json::json!({
            "stream_ids": stream_ids,
            "comment": params.comment,
        });

        client.call(Self::NAME, &ACK_ALERTS, &[], Some(payload)).await
    }

    /// Execute the tool logic (for STDIO transport via rmcp).
    #[instrument(skip_all, fields(count = params.stream_ids.len()))]
    pub async fn execute(client: &RdClient, params: &AckAlertsParams) -> CallToolResult {
        info!("Acknowledging {} alert stream(s)", params.stream_ids.len());
        tool_result(Self::NAME, Self::call(client, params).await)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: Value,
        client: &RdClient,
    ) -> Result<Value, crate::domains::tools::ToolError> {
        let params: AckAlertsParams = super::common::parse_http_params(arguments)?;
        Ok(super::common::http_response(
            Self::execute(client, &params).await,
        ))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AckAlertsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(client: Arc<RdClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let client = client.clone();
            async move {
                let params: AckAlertsParams = parse_params(args)?;
                Ok(Self::execute(&client, &params).await)
            }
            .boxed()
        })
    }
}
