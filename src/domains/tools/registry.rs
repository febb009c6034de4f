//! Tool Registry - central listing and dispatch for all tools.
//!
//! This module provides:
//! - The names and metadata of every tool
//! - HTTP dispatch for tool calls (when http feature is enabled)

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::core::rd::RdClient;

use super::definitions::{
    AckAlertsTool, CreateCustomerTool, CreateTeLspTool, LSP_TOOLS, READ_TOOLS, TopologyNodesTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    client: Arc<RdClient>,
}

impl ToolRegistry {
    /// Create a new tool registry dispatching to `client`.
    pub fn new(client: Arc<RdClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = READ_TOOLS.iter().map(|t| t.name).collect();
        names.extend([
            AckAlertsTool::NAME,
            CreateCustomerTool::NAME,
            TopologyNodesTool::NAME,
            CreateTeLspTool::NAME,
        ]);
        names.extend(LSP_TOOLS.iter().map(|t| t.name));
        names
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Both transports list tools from here.
    pub fn get_all_tools() -> Vec<Tool> {
        let mut tools: Vec<Tool> = READ_TOOLS.iter().map(|t| t.to_tool()).collect();
        tools.extend([
            AckAlertsTool::to_tool(),
            CreateCustomerTool::to_tool(),
            TopologyNodesTool::to_tool(),
            CreateTeLspTool::to_tool(),
        ]);
        tools.extend(LSP_TOOLS.iter().map(|t| t.to_tool()));
        tools
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, super::ToolError> {
        use super::definitions::{LspTool, ReadTool};

        let client = self.client.as_ref();

        if let Some(tool) = ReadTool::find(name) {
            return Ok(tool.http_handler(client).await);
        }
        if let Some(tool) = LspTool::find(name) {
            return tool.http_handler(arguments, client).await;
        }

        match name {
            AckAlertsTool::NAME => AckAlertsTool::http_handler(arguments, client).await,
            CreateCustomerTool::NAME => CreateCustomerTool::http_handler(arguments, client).await,
            TopologyNodesTool::NAME => TopologyNodesTool::http_handler(arguments, client).await,
            CreateTeLspTool::NAME => CreateTeLspTool::http_handler(arguments, client).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(super::ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names.len(), 19);
        assert_eq!(names.iter().collect::<HashSet<_>>().len(), 19);
        for expected in [
            "get_alert",
            "ack_alerts",
            "create_customer",
            "get_topology_nodes",
            "create_te_lsp",
            "delete_te_lsp",
            "get_te_lsp_history",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_metadata_matches_names() {
        let tools = ToolRegistry::get_all_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names, ToolRegistry::tool_names());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let rd = crate::core::config::RdConfig {
            server: Some("rd.example.net".to_string()),
            ..Default::default()
        };
        let client =
            RdClient::new(&rd, &crate::core::config::CredentialsConfig::default()).unwrap();
        let registry = ToolRegistry::new(Arc::new(client));

        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert!(matches!(result, Err(super::super::ToolError::NotFound(_))));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_rejects_bad_arguments() {
        let rd = crate::core::config::RdConfig {
            server: Some("rd.example.net".to_string()),
            ..Default::default()
        };
        let client =
            RdClient::new(&rd, &crate::core::config::CredentialsConfig::default()).unwrap();
        let registry = ToolRegistry::new(Arc::new(client));

        let result = registry
            .call_tool("get_te_lsp", serde_json::json!({"id": "x"}))
            .await;
        assert!(matches!(
            result,
            Err(super::super::ToolError::InvalidArguments(_))
        ));
    }
}
