//! File-system toolkit for agents: listing, tree rendering, regex search,
//! line-oriented editing, bounded shell commands and a session task list,
//! each exposed as a named tool that returns a single string.

pub mod command;
pub mod editor;
pub mod error;
pub mod listing;
pub mod path;
pub mod search;
pub mod text;
pub mod todo;
pub mod tools;
pub mod tree;
pub mod walker;

pub use error::FsError;
pub use path::{resolve, PathKind, ResolvedPath};
pub use todo::{TodoItem, TodoList, TodoPriority, TodoStatus};
pub use tools::{SandboxLevel, Session, ToolCall, ToolContext, ToolRegistry};
pub use walker::{TreeWalker, WalkEntry, WalkOptions};
