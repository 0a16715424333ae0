//! Typed tool calls.
//!
//! Every tool is one `ToolCall` variant and `text_editor` and `todo` carry
//! their own operation enums, so dispatch is an exhaustive `match`.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::FsError;
use crate::search::DEFAULT_MAX_RESULTS;
use crate::todo::TodoItem;

/// Names of the built-in tools, in registry order.
pub const TOOL_NAMES: &[&str] = &["ls", "tree", "grep", "text_editor", "bash", "todo"];

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "tool", content = "args", rename_all = "snake_case")]
pub enum ToolCall {
    Ls(LsArgs),
    Tree(TreeArgs),
    Grep(GrepArgs),
    TextEditor(EditCommand),
    Bash(BashArgs),
    Todo(TodoCommand),
}

impl ToolCall {
    /// Build a call from a tool name and its JSON arguments.
    ///
    /// An empty argument string means "no arguments".
    pub fn parse(name: &str, args_json: &str) -> Result<Self, FsError> {
        let args: Value = if args_json.trim().is_empty() {
            json!({})
        } else {
            serde_json::from_str(args_json)?
        };
        Self::from_value(name, args)
    }

    pub fn from_value(name: &str, args: Value) -> Result<Self, FsError> {
        if !TOOL_NAMES.contains(&name) {
            return Err(FsError::UnknownTool(name.to_string()));
        }
        if !args.is_object() {
            return Err(FsError::InvalidArgument(
                "arguments must be a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(json!({ "tool": name, "args": args }))?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ls(_) => "ls",
            Self::Tree(_) => "tree",
            Self::Grep(_) => "grep",
            Self::TextEditor(_) => "text_editor",
            Self::Bash(_) => "bash",
            Self::Todo(_) => "todo",
        }
    }
}

fn current_dir() -> String {
    ".".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

#[derive(Debug, Clone, Deserialize)]
pub struct LsArgs {
    #[serde(default = "current_dir")]
    pub path: String,
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default)]
    pub long_format: bool,
    #[serde(default)]
    pub recursive: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeArgs {
    #[serde(default = "current_dir")]
    pub path: String,
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default)]
    pub dirs_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrepArgs {
    pub pattern: String,
    #[serde(default = "current_dir")]
    pub path: String,
    #[serde(default)]
    pub file_pattern: Option<String>,
    #[serde(default)]
    pub case_insensitive: bool,
    #[serde(default)]
    pub context_lines: usize,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum EditCommand {
    View {
        file_path: String,
        #[serde(default)]
        start_line: Option<usize>,
        #[serde(default)]
        end_line: Option<usize>,
    },
    Create {
        file_path: String,
        content: String,
    },
    Insert {
        file_path: String,
        line_number: usize,
        content: String,
    },
    StrReplace {
        file_path: String,
        old_str: String,
        new_str: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct BashArgs {
    pub command: String,
    #[serde(default)]
    pub working_dir: Option<String>,
    /// Seconds; the session default applies when absent.
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default = "default_true")]
    pub capture_stderr: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum TodoCommand {
    Write { items: Vec<TodoItem> },
    List,
}
