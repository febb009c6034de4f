//! Customer creation tool.
//!
//! Creates a customer in the Routing Director service-orchestration inventory.
//! Any failure is logged and the tool returns `null`.

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

use crate::core::rd::{RdClient, RdError, RdResult, endpoints::CREATE_CUSTOMER};

use super::common::{parse_params, tool_result};

/// Parameters for creating a customer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateCustomerParams {
    /// Customer name.
    #[schemars(description = "Name of the new customer")]
    pub customer_name: String,

    /// Free-form description.
    #[serde(default)]
    #[schemars(description = "Optional customer description")]
    pub description: String,
}

/// Create a customer in the Routing Director customer inventory.
pub struct CreateCustomerTool;

impl CreateCustomerTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create_customer";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a new customer in the Routing Director customer inventory. Returns the created customer, or null if the request fails.";

    /// Create the customer and return the settled envelope (`null` on failure).
    pub async fn call(client: &RdClient, params: &CreateCustomerParams) -> RdResult<Value> {
        let name = params.customer_name.trim();
        if name.is_empty() {
            let err = RdError::invalid_request("customer_name must not be empty");
            return CREATE_CUSTOMER.policy.settle(Self::NAME, Err(err));
        }

        let payload = serde_json::json!({
            "name": name,
            "description": params.description,
        });

        client.call(Self::NAME, &CREATE_CUSTOMER, &[], Some(payload)).await
    }

    /// Execute the tool logic (for STDIO transport via rmcp).
    #[instrument(skip_all, fields(customer = %params.customer_name))]
    pub async fn execute(client: &RdClient, params: &CreateCustomerParams) -> CallToolResult {
        info!("Creating customer {}", params.customer_name);
        tool_result(Self::NAME, Self::call(client, params).await)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: Value,
        client: &RdClient,
    ) -> Result<Value, crate::domains::tools::ToolError> {
        let params: CreateCustomerParams = super::common::parse_http_params(arguments)?;
        Ok(super::common::http_response(
            Self::execute(client, &params).await,
        ))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CreateCustomerParams>(),
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
                let params: CreateCustomerParams = parse_params(args)?;
                Ok(Self::execute(&client, &params).await)
            }
            .boxed()
        })
    }
}
