//! Tool discovery metadata
//!
//! Static descriptor an agent fetches before invoking tools.

pub mod tools;

pub use tools::{descriptor, get_tool_definitions, ServerDescriptor, ToolDefinition, EXPORT_TOOL};
