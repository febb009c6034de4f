//! Tool Router - builds the rmcp ToolRouter for the STDIO transport.
//!
//! Each tool knows how to create its own route; this module only collects them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::rd::RdClient;

use super::definitions::{
    AckAlertsTool, CreateCustomerTool, CreateTeLspTool, LSP_TOOLS, READ_TOOLS, TopologyNodesTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<RdClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();

    for tool in READ_TOOLS {
        router = router.with_route(tool.create_route(client.clone()));
    }
    for tool in LSP_TOOLS {
        router = router.with_route(tool.create_route(client.clone()));
    }

    router
        .with_route(AckAlertsTool::create_route(client.clone()))
        .with_route(CreateCustomerTool::create_route(client.clone()))
        .with_route(TopologyNodesTool::create_route(client.clone()))
        .with_route(CreateTeLspTool::create_route(client))
}
