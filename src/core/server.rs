//! MCP Server implementation and lifecycle management.
//!
//! [`McpServer`] owns the Routing Director client and the tool router. Only
//! the tools capability is advertised.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/`. Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built in `domains/tools/router.rs`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Error;
use super::rd::RdClient;
use crate::domains::tools::build_tool_router;

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared Routing Director client; holds the auth cache.
    client: Arc<RdClient>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when no Routing Director address is configured.
    pub fn new(config: Config) -> crate::Result<Self> {
        if config.rd.base_url().is_none() {
            return Err(Error::config(
                "Routing Director address missing: set RD_SERVER or RD_BASE_URL",
            ));
        }

        let client = Arc::new(RdClient::new(&config.rd, &config.credentials)?);
        info!(
            "Routing Director client ready for {} (org {})",
            client.base_url(),
            client.org_id()
        );

        Ok(Self {
            tool_router: build_tool_router::<Self>(client.clone()),
            config: Arc::new(config),
            client,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the Routing Director client.
    pub fn client(&self) -> &Arc<RdClient> {
        &self.client
    }

    /// Usage notes sent to clients on initialize.
    pub fn instructions(&self) -> String {
        format!(
            "Tools for the Juniper Routing Director at {} (organisation {}). \
             Read tools return the RD JSON as-is or wrapped as {{<items>, total}}. \
             Topology and TE-LSP tools report RD rejections as \
             {{success: false, status_code, error}}; other failures come back as {{error}}.",
            self.client.base_url(),
            self.client.org_id()
        )
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let registry = ToolRegistry::new(self.client.clone());
        registry
            .call_tool(name, arguments)
            .await
            .map_err(|e| e.to_string())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Default::default()
            },
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        let mut config = Config::default();
        config.rd.server = Some("rd.example.net".to_string());
        config.rd.org_id = "org-1".to_string();
        config
    }

    #[test]
    fn test_new_requires_rd_address() {
        let err = McpServer::new(Config::default()).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("RD_SERVER"));
    }

    #[test]
    fn test_info_advertises_tools_only() {
        let server = McpServer::new(config()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "routing-director-mcp");
        assert!(info.instructions.unwrap().contains("https://rd.example.net"));
    }

    #[test]
    fn test_list_tools() {
        let server = McpServer::new(config()).unwrap();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 19);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }
}
