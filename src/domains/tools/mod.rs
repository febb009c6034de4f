//! Tools domain module.
//!
//! Every Routing Director operation is exposed as an MCP tool. A tool renders
//! its endpoint, lets [`RdClient`](crate::core::rd::RdClient) execute it and
//! returns the settled JSON envelope.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations (tables for uniform tools, one file otherwise)
//! - `router.rs` - ToolRouter builder for the STDIO transport
//! - `registry.rs` - Tool listing and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add the endpoint descriptor to `core/rd/endpoints.rs`
//! 2. Add a `READ_TOOLS` entry, or a file in `definitions/` when it takes arguments
//! 3. Add its route in `router.rs`
//! 4. Register it in `registry.rs` for HTTP support

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
