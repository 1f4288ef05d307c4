//! Model Context Protocol (MCP) server support
//!
//! Every client operation is exposed as an MCP tool. Tool arguments are plain
//! JSON; pagination, multipart encoding and tag-name resolution stay behind the
//! client so callers never deal with them.

pub mod server;
pub mod shared_utils;
pub mod tool_registry;
pub mod tools;
pub mod types;
pub mod utils;


pub use server::JoplinMcpServer;
pub use tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
pub use tools::register_all_tools;
