//! Tool definitions module.
//!
//! Parameterless reads are declared as a table in `catalog`; tools that take
//! arguments get their own file.

pub mod alerts;
pub mod catalog;
pub mod common;
pub mod customers;
pub mod te_lsp;
pub mod topology;

pub use alerts::{AckAlertsParams, AckAlertsTool};
pub use catalog::{NoParams, READ_TOOLS, ReadTool};
pub use customers::{CreateCustomerParams, CreateCustomerTool};
pub use te_lsp::{CreateTeLspParams, CreateTeLspTool, LSP_TOOLS, LspIdParams, LspTool, PathType};
pub use topology::{TopologyNodesParams, TopologyNodesTool};
