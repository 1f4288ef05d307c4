//! MCP tools, grouped by the domain they operate on
//!
//! Every tool parses its arguments into a request type from
//! [`crate::mcp::types`], calls one client operation and returns the result as
//! pretty-printed JSON.

pub mod notebooks;
pub mod notes;
pub mod resources;
pub mod revisions;
pub mod tags;

use crate::mcp::tool_registry::ToolRegistry;

/// Register every tool with the registry
pub fn register_all_tools(registry: &mut ToolRegistry) {
    notebooks::register_notebook_tools(registry);
    notes::register_note_tools(registry);
    tags::register_tag_tools(registry);
    resources::register_resource_tools(registry);
    revisions::register_revision_tools(registry);
}
