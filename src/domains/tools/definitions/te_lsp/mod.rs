//! TE-LSP tools.
//!
//! `list_te_lsps` lives in the read catalog; this module holds the tools
//! that take arguments.

pub mod create;
pub mod lookup;

pub use create::{CreateTeLspParams, CreateTeLspTool, PathType};
pub use lookup::{LSP_TOOLS, LspIdParams, LspTool};
