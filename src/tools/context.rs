use std::path::{Path, PathBuf};

use crate::command::{validate_timeout, DEFAULT_TIMEOUT_SECS};
use crate::error::FsError;
use crate::path::{is_within, resolve, ResolvedPath};
use crate::walker::WalkOptions;

use super::sandbox::SandboxLevel;

/// Per-session settings every tool runs against.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub working_dir: PathBuf,
    /// Roots the tools may touch; empty means unrestricted.
    pub allowed_paths: Vec<PathBuf>,
    pub sandbox: SandboxLevel,
    pub extra_ignored: Vec<String>,
    pub command_timeout_secs: u64,
}

impl ToolContext {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            allowed_paths: Vec::new(),
            sandbox: SandboxLevel::default(),
            extra_ignored: Vec::new(),
            command_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Relative roots are taken from the working directory.
    pub fn with_allowed_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.allowed_paths = paths
            .into_iter()
            .map(|p| self.working_dir.join(p.as_ref()))
            .collect();
        self
    }

    pub fn with_sandbox(mut self, sandbox: SandboxLevel) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_extra_ignored(mut self, names: Vec<String>) -> Self {
        self.extra_ignored = names;
        self
    }

    pub fn with_command_timeout(mut self, secs: u64) -> Result<Self, FsError> {
        validate_timeout(secs)?;
        self.command_timeout_secs = secs;
        Ok(self)
    }

    /// Traversal options carrying the session's ignore set.
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions::default().with_extra_ignored(&self.extra_ignored)
    }

    /// Resolve a tool path argument and apply the allowed-roots policy.
    pub fn resolve(&self, raw: &str) -> Result<ResolvedPath, FsError> {
        let resolved = resolve(raw, &self.working_dir)?;
        self.check_allowed(&resolved.path)?;
        Ok(resolved)
    }

    fn check_allowed(&self, path: &Path) -> Result<(), FsError> {
        if self.allowed_paths.is_empty()
            || self.allowed_paths.iter().any(|root| is_within(path, root))
        {
            return Ok(());
        }
        log::warn!("refused path outside allowed roots: {}", path.display());
        Err(FsError::NotAllowed(format!(
            "path '{}' is outside the allowed paths",
            path.display()
        )))
    }

    /// Refuse a mutation the sandbox does not permit.
    pub fn check_write(&self, target: &ResolvedPath) -> Result<(), FsError> {
        if self
            .sandbox
            .is_write_allowed(&target.path, &self.working_dir)
        {
            return Ok(());
        }
        Err(FsError::NotAllowed(match self.sandbox {
            SandboxLevel::ReadOnly => "sandbox is read-only".to_string(),
            _ => format!("'{}' is outside the workspace", target.display()),
        }))
    }

    /// Resolve the directory a command runs in and apply the sandbox.
    pub fn command_dir(&self, raw: Option<&str>) -> Result<PathBuf, FsError> {
        if !self.sandbox.allows_commands() {
            return Err(FsError::NotAllowed(
                "sandbox is read-only; commands are disabled".to_string(),
            ));
        }
        match raw {
            Some(raw) => Ok(self.resolve(raw)?.path),
            None => {
                self.check_allowed(&self.working_dir)?;
                Ok(self.working_dir.clone())
            }
        }
    }
}
