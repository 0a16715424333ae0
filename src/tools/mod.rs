//! Named tool boundary: typed calls, definitions, sessions and the registry.

mod builtin;
mod call;
mod context;
mod definition;
mod registry;
mod sandbox;
mod session;

pub use builtin::builtin_tools;
pub use call::{
    BashArgs, EditCommand, GrepArgs, LsArgs, TodoCommand, ToolCall, TreeArgs, TOOL_NAMES,
};
pub use context::ToolContext;
pub use definition::{ToolDefinition, ToolParam};
pub use registry::ToolRegistry;
pub use sandbox::SandboxLevel;
pub use session::Session;
