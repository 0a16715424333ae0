use std::path::Path;

use serde::{Deserialize, Serialize};

use fskit::command::DEFAULT_TIMEOUT_SECS;
use fskit::{FsError, SandboxLevel, ToolContext};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub enabled: Vec<String>,
    pub allowed_paths: Vec<String>,
    pub sandbox: SandboxLevel,
    pub extra_ignored: Vec<String>,
    pub command_timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: Vec::new(),
            allowed_paths: Vec::new(),
            sandbox: SandboxLevel::default(),
            extra_ignored: Vec::new(),
            command_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ToolsConfig {
    pub fn context(&self, working_dir: &Path) -> Result<ToolContext, FsError> {
        ToolContext::new(working_dir)
            .with_allowed_paths(&self.allowed_paths)
            .with_sandbox(self.sandbox)
            .with_extra_ignored(self.extra_ignored.clone())
            .with_command_timeout(self.command_timeout_secs)
    }
}
