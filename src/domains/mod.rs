//! Domains module containing the MCP-facing surface of the server.
//!
//! Only tools are exposed; Routing Director has nothing that maps naturally
//! onto MCP resources or prompts.

pub mod tools;
