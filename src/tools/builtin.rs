use serde_json::json;

use super::definition::{ToolDefinition, ToolParam};

/// Definitions of every built-in tool, in the order of `TOOL_NAMES`.
pub fn builtin_tools() -> Vec<ToolDefinition> {
    vec![
        ls_tool(),
        tree_tool(),
        grep_tool(),
        text_editor_tool(),
        bash_tool(),
        todo_tool(),
    ]
}

fn ls_tool() -> ToolDefinition {
    ToolDefinition {
        name: "ls",
        description: "List the contents of a directory.",
        params: vec![
            ToolParam::simple("path", "Directory to list (default: current directory).", "string"),
            ToolParam::simple("show_hidden", "Include entries starting with '.'.", "boolean"),
            ToolParam::simple(
                "long_format",
                "Show permissions, type, size and modification time.",
                "boolean",
            ),
            ToolParam::simple("recursive", "List subdirectories recursively.", "boolean"),
        ],
        required: Vec::new(),
    }
}

fn tree_tool() -> ToolDefinition {
    ToolDefinition {
        name: "tree",
        description: "Render a directory as an indented tree.",
        params: vec![
            ToolParam::simple("path", "Root directory (default: current directory).", "string"),
            ToolParam::simple("max_depth", "Maximum depth to descend.", "integer"),
            ToolParam::simple("show_hidden", "Include entries starting with '.'.", "boolean"),
            ToolParam::simple("dirs_only", "Show directories only.", "boolean"),
        ],
        required: Vec::new(),
    }
}

fn grep_tool() -> ToolDefinition {
    ToolDefinition {
        name: "grep",
        description: "Search file contents with a regular expression.",
        params: vec![
            ToolParam::simple("pattern", "Regular expression to search for.", "string"),
            ToolParam::simple("path", "File or directory to search (default: current directory).", "string"),
            ToolParam::simple("file_pattern", "Glob restricting searched files, e.g. '*.rs'.", "string"),
            ToolParam::simple("case_insensitive", "Ignore case when matching.", "boolean"),
            ToolParam::simple("context_lines", "Lines of context around each match.", "integer"),
            ToolParam::simple("max_results", "Maximum number of matches (default: 100).", "integer"),
        ],
        required: vec!["pattern"],
    }
}

fn text_editor_tool() -> ToolDefinition {
    ToolDefinition {
        name: "text_editor",
        description: "View, create and edit text files.",
        params: vec![
            ToolParam::one_of(
                "operation",
                "Operation to perform.",
                &["view", "create", "insert", "str_replace"],
            ),
            ToolParam::simple("file_path", "Path of the file.", "string"),
            ToolParam::simple("start_line", "First line to view (1-based).", "integer"),
            ToolParam::simple("end_line", "Last line to view (inclusive).", "integer"),
            ToolParam::simple("line_number", "Line the inserted content starts at.", "integer"),
            ToolParam::simple("content", "Content for create and insert.", "string"),
            ToolParam::simple("old_str", "Exact text to replace (every occurrence).", "string"),
            ToolParam::simple("new_str", "Replacement text.", "string"),
        ],
        required: vec!["operation", "file_path"],
    }
}

fn bash_tool() -> ToolDefinition {
    ToolDefinition {
        name: "bash",
        description: "Run a shell command and capture its output.",
        params: vec![
            ToolParam::simple("command", "Command line passed to the shell.", "string"),
            ToolParam::simple("working_dir", "Directory to run in (default: working directory).", "string"),
            ToolParam::simple("timeout", "Timeout in seconds (1-300).", "integer"),
            ToolParam::simple("capture_stderr", "Include stderr in the output (default: true).", "boolean"),
        ],
        required: vec!["command"],
    }
}

fn todo_tool() -> ToolDefinition {
    ToolDefinition {
        name: "todo",
        description: "Maintain the session task list.",
        params: vec![
            ToolParam::one_of("operation", "Operation to perform.", &["write", "list"]),
            ToolParam::array(
                "items",
                "Complete task list for 'write'.",
                json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "content": { "type": "string" },
                        "priority": { "type": "string", "enum": ["low", "medium", "high"] },
                        "status": {
                            "type": "string",
                            "enum": ["pending", "in_progress", "completed", "cancelled"]
                        }
                    },
                    "required": ["id", "content"]
                }),
            ),
        ],
        required: vec!["operation"],
    }
}
