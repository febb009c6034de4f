//! Routing Director MCP Server Library
//!
//! Exposes the Juniper Routing Director REST API as Model Context Protocol
//! tools: alerts, inventory, sites, BGP, health, customers, topologies and
//! TE-LSP provisioning.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, the Routing Director client, the MCP
//!   server and its transports
//! - **domains**: the MCP surface
//!   - **tools**: one tool per Routing Director operation
//!
//! # Example
//!
//! ```rust,no_run
//! use routing_director_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, RdClient, Result};
