//! Tools addressing a single TE-LSP by id.
//!
//! Fetching, deleting and reading the history of an LSP share the same
//! `lsp_id` argument, so they are declared as a table like the read catalog.

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

use crate::core::rd::{Endpoint, RdClient, RdResult, endpoints};

use super::super::common::{parse_params, tool_result};

/// Parameters identifying one LSP.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LspIdParams {
    #[schemars(description = "Identifier of the TE-LSP, as returned by list_te_lsps")]
    pub lsp_id: String,
}

/// A tool operating on one LSP through a single endpoint.
#[derive(Debug)]
pub struct LspTool {
    pub name: &'static str,
    pub description: &'static str,
    pub endpoint: Endpoint,
}

pub static LSP_TOOLS: &[LspTool] = &[
    LspTool {
        name: "get_te_lsp",
        description: "Get the details of one TE-LSP. Returns {success: false, status_code, error} when Routing Director rejects the request.",
        endpoint: endpoints::TE_LSP,
    },
    LspTool {
        name: "delete_te_lsp",
        description: "Delete a TE-LSP. Returns {success: true, status_code} when Routing Director answers with an empty body.",
        endpoint: endpoints::DELETE_TE_LSP,
    },
    LspTool {
        name: "get_te_lsp_history",
        description: "Get the state history of a TE-LSP. Returns {history, total}.",
        endpoint: endpoints::TE_LSP_HISTORY,
    },
];

impl LspTool {
    pub fn find(name: &str) -> Option<&'static LspTool> {
        LSP_TOOLS.iter().find(|tool| tool.name == name)
    }

    pub async fn call(&self, client: &RdClient, params: &LspIdParams) -> RdResult<Value> {
        client
            .call(
                self.name,
                &self.endpoint,
                &[("lsp_id", params.lsp_id.trim())],
                None,
            )
            .await
    }

    #[instrument(skip_all, fields(tool = self.name, lsp_id = %params.lsp_id))]
    pub async fn execute(&self, client: &RdClient, params: &LspIdParams) -> CallToolResult {
        info!("{} {} for LSP {}", self.name, self.endpoint.method, params.lsp_id);
        tool_result(self.name, self.call(client, params).await)
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        &self,
        arguments: Value,
        client: &RdClient,
    ) -> Result<Value, crate::domains::tools::ToolError> {
        let params: LspIdParams = super::super::common::parse_http_params(arguments)?;
        Ok(super::super::common::http_response(
            self.execute(client, &params).await,
        ))
    }

    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: cached_schema_for_type::<LspIdParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(&'static self, client: Arc<RdClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(self.to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let client = client.clone();
            async move {
                let params: LspIdParams = parse_params(args)?;
                Ok(self.execute(&client, &params).await)
            }
            .boxed()
        })
    }
}
