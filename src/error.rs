use std::io;
use std::path::Path;

use thiserror::Error;

/// Error kinds returned by every file-system operation.
///
/// Errors never cross the tool boundary as panics: the registry renders them
/// as `Error: <message>` strings.
#[derive(Debug, Error)]
pub enum FsError {
    /// Nothing exists at the resolved path.
    #[error("Path '{path}' does not exist")]
    PathNotFound { path: String },
    /// A file was required but a directory was given.
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },
    /// A directory was required but something else was given.
    #[error("Path '{path}' is not a directory")]
    NotADirectory { path: String },
    /// Create refuses to overwrite.
    #[error("File '{path}' already exists. Use str_replace or insert to modify existing files.")]
    AlreadyExists { path: String },
    /// The OS refused access.
    #[error("Permission denied {action} '{path}'")]
    PermissionDenied { path: String, action: &'static str },
    /// Content is not valid UTF-8.
    #[error("File '{path}' is not a text file (binary content detected)")]
    BinaryFile { path: String },
    /// The search pattern failed to compile.
    #[error("Invalid regex pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    /// A line range is malformed.
    #[error("{0}")]
    InvalidRange(String),
    /// A line range lies outside the file.
    #[error("{0}")]
    RangeOutOfBounds(String),
    /// Replace target is absent from the file.
    #[error("String '{needle}' not found in '{path}'")]
    StringNotFound { needle: String, path: String },
    /// A required argument was not supplied.
    #[error("'{0}' parameter is required")]
    MissingArgument(String),
    /// An argument was supplied but its value is unacceptable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The external command did not finish in time.
    #[error("Command timed out after {secs} seconds")]
    Timeout { secs: u64 },
    /// No tool with that name is registered.
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),
    /// The session policy refused the operation.
    #[error("Not allowed: {0}")]
    NotAllowed(String),
    /// Any other OS-level failure.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Classify an I/O error raised while touching `path`.
    ///
    /// `action` completes the sentence "Permission denied <action> '<path>'".
    pub fn from_io(err: io::Error, path: &Path, action: &'static str) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => FsError::PathNotFound { path },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path, action },
            io::ErrorKind::IsADirectory => FsError::NotAFile { path },
            io::ErrorKind::NotADirectory => FsError::NotADirectory { path },
            io::ErrorKind::InvalidData => FsError::BinaryFile { path },
            _ => FsError::Io { path, source: err },
        }
    }

    /// Render the error the way it is returned across the tool boundary.
    pub fn to_tool_output(&self) -> String {
        format!("Error: {self}")
    }
}

impl From<serde_json::Error> for FsError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        match missing_field(&message) {
            Some(field) => FsError::MissingArgument(field.to_string()),
            None => FsError::InvalidArgument(message),
        }
    }
}

/// Extract the field name from serde's "missing field `x`" message.
fn missing_field(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}
