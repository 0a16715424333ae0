//! Sandbox levels for mutating tools.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::path::is_within;

/// How far mutating tools may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SandboxLevel {
    /// No file modifications and no commands.
    ReadOnly,
    /// Modifications only under the working directory.
    #[default]
    WorkspaceWrite,
    /// Everything.
    FullAccess,
}

impl SandboxLevel {
    #[must_use]
    pub const fn allows_write(&self) -> bool {
        matches!(self, Self::WorkspaceWrite | Self::FullAccess)
    }

    #[must_use]
    pub const fn allows_commands(&self) -> bool {
        self.allows_write()
    }

    /// Check whether `path` may be modified given the workspace root.
    #[must_use]
    pub fn is_write_allowed(&self, path: &Path, workspace: &Path) -> bool {
        match self {
            Self::ReadOnly => false,
            Self::FullAccess => true,
            Self::WorkspaceWrite => is_within(path, workspace),
        }
    }
}
