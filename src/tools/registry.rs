use serde_json::Value;

use crate::error::FsError;

use super::builtin::builtin_tools;
use super::call::ToolCall;
use super::definition::ToolDefinition;
use super::session::Session;

/// The set of tools a caller may invoke.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: builtin_tools(),
        }
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the named tools; an empty list keeps everything.
    pub fn with_enabled(mut self, enabled: &[String]) -> Self {
        if !enabled.is_empty() {
            self.tools
                .retain(|tool| enabled.iter().any(|name| name == tool.name));
        }
        self
    }

    /// Get the list of tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name == name)
    }

    /// JSON schemas of every enabled tool.
    pub fn schemas(&self) -> Value {
        Value::Array(self.tools.iter().map(ToolDefinition::schema).collect())
    }

    /// Parse and run one call. Failures come back as `Error:` text.
    pub fn execute(&self, session: &mut Session, name: &str, args_json: &str) -> String {
        match self.parse(name, args_json) {
            Ok(call) => session.run(call),
            Err(err) => {
                log::info!("rejected call to {name}: {err}");
                err.to_tool_output()
            }
        }
    }

    /// Run an already-typed call if its tool is enabled.
    pub fn run(&self, session: &mut Session, call: ToolCall) -> String {
        if !self.has_tool(call.name()) {
            return FsError::UnknownTool(call.name().to_string()).to_tool_output();
        }
        session.run(call)
    }

    /// Parse a call, refusing tools that are not enabled.
    pub fn parse(&self, name: &str, args_json: &str) -> Result<ToolCall, FsError> {
        if !self.has_tool(name) {
            return Err(FsError::UnknownTool(name.to_string()));
        }
        ToolCall::parse(name, args_json)
    }
}
