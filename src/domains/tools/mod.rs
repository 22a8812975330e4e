//! Tools domain - everything callable through the MCP surface.

pub mod definitions;
pub mod error;
pub mod money;
pub mod registry;
pub mod router;
pub mod validate;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
